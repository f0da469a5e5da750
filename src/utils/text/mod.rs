//! Case-insensitive string helpers shared by the resolver, container and task list.

/// Compare two strings ignoring case, using full Unicode lowercase mapping.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Key used to deduplicate strings case-insensitively.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Distinct values joined with `|`, ordered ignoring case; ties fall back to ordinal order.
pub fn join_distinct_sorted<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut distinct: Vec<&str> = values.into_iter().collect();
    distinct.sort_by(|a, b| fold_case(a).cmp(&fold_case(b)).then_with(|| a.cmp(b)));
    distinct.dedup();
    distinct.join("|")
}

/// Compare two document paths, ignoring case and separator style.
pub fn same_document(a: &str, b: &str) -> bool {
    let normalize = |path: &str| path.replace('\\', "/");
    eq_ignore_case(&normalize(a), &normalize(b))
}
