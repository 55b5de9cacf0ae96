//! Query-string parameters understood by the reader routes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryParam {
    Translations,
}

impl QueryParam {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Translations => "translations",
        }
    }
}

/// Writes a query parameter with a client-side navigation.
pub trait QueryParamWriter {
    fn set_query_param(&mut self, param: QueryParam, value: String);
}

pub fn join_translation_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses `"131,20"` into unique ids, dropping anything that is not an id.
pub fn parse_translation_ids(raw: &str) -> Vec<u32> {
    let mut ids = Vec::new();
    for id in raw
        .split(',')
        .filter_map(|token| token.trim().parse::<u32>().ok())
    {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Ids the reader should show: the query parameter wins when it names any.
pub fn effective_translations(query_value: &str, selected: &[u32]) -> Vec<u32> {
    let from_query = parse_translation_ids(query_value);
    if from_query.is_empty() {
        selected.to_vec()
    } else {
        from_query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn joins_in_array_order() {
        assert_eq!(join_translation_ids(&[131, 20, 85]), "131,20,85");
        assert_eq!(join_translation_ids(&[]), "");
    }

    #[rstest]
    #[case("131,20", vec![131, 20])]
    #[case(" 131 , 20 ,", vec![131, 20])]
    #[case("20,abc,20,-1,7", vec![20, 7])]
    #[case("", vec![])]
    fn parses_translation_ids(#[case] raw: &str, #[case] expected: Vec<u32>) {
        assert_eq!(parse_translation_ids(raw), expected);
    }

    #[test]
    fn query_overrides_selection_when_present() {
        assert_eq!(effective_translations("20", &[131]), vec![20]);
        assert_eq!(effective_translations("", &[131]), vec![131]);
        assert_eq!(effective_translations("junk", &[131]), vec![131]);
    }
}
