//! Column label generation.
//!
//! Column labels use bijective base-26 letters, the familiar spreadsheet
//! scheme: 0 -> A, 25 -> Z, 26 -> AA, 27 -> AB. There is no zero digit, so
//! this is not ordinary base-26. Labels are generated in index order and
//! ordering of the generated labels matches index ordering.

/// Convert a zero-based column index to its letter label (0 -> A, 26 -> AA).
pub fn column_name(index: usize) -> String {
    let mut name = String::new();
    let mut n = index as u128 + 1;
    while n > 0 {
        n -= 1;
        name.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    name
}

/// Generate the first `count` column labels in index order.
pub fn column_names(count: usize) -> Vec<String> {
    (0..count).map(column_name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letter_labels() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(1), "B");
        assert_eq!(column_name(25), "Z");
    }

    #[test]
    fn test_multi_letter_labels() {
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(51), "AZ");
        assert_eq!(column_name(52), "BA");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_column_names_sequence() {
        let names = column_names(28);
        assert_eq!(names.len(), 28);
        assert_eq!(names[0], "A");
        assert_eq!(names[25], "Z");
        assert_eq!(names[26], "AA");
        assert_eq!(names[27], "AB");
    }

    #[test]
    fn test_labels_are_unique() {
        let names = column_names(1000);
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn test_handles_max_usize() {
        let name = column_name(usize::MAX);
        assert!(!name.is_empty());
        assert!(name.chars().all(|c| c.is_ascii_uppercase()));
    }
}
