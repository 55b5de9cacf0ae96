/// Selection after a checkbox for `id` changed to `is_checked`.
///
/// Checking appends `id` once; unchecking removes every occurrence. Order of
/// the remaining ids is preserved.
pub fn next_selection(current: &[u32], id: u32, is_checked: bool) -> Vec<u32> {
    if is_checked {
        let mut next = current.to_vec();
        if !next.contains(&id) {
            next.push(id);
        }
        next
    } else {
        current.iter().copied().filter(|&selected| selected != id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], 131, true, vec![131])]
    #[case(&[131], 20, true, vec![131, 20])]
    #[case(&[131, 20], 131, false, vec![20])]
    #[case(&[131], 7, false, vec![131])]
    fn toggles(
        #[case] current: &[u32],
        #[case] id: u32,
        #[case] checked: bool,
        #[case] expected: Vec<u32>,
    ) {
        assert_eq!(next_selection(current, id, checked), expected);
    }

    #[test]
    fn repeated_toggles_are_idempotent() {
        let once = next_selection(&[131], 20, true);
        let twice = next_selection(&once, 20, true);
        assert_eq!(once, twice);

        let off = next_selection(&twice, 20, false);
        assert_eq!(next_selection(&off, 20, false), off);
    }

    #[test]
    fn unchecking_removes_stray_duplicates() {
        assert_eq!(next_selection(&[20, 131, 20], 20, false), vec![131]);
    }

    #[test]
    fn checking_never_duplicates() {
        let mut selection = Vec::new();
        for id in [1, 2, 1, 3, 2] {
            selection = next_selection(&selection, id, true);
        }
        assert_eq!(selection, vec![1, 2, 3]);
    }
}
