/// Distinct non-empty categories in first-seen order.
///
/// Feeds the `heritageCategories` list that accompanies figure listings.
pub fn distinct_categories<'a>(categories: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in categories {
        let category = category.trim();
        if !category.is_empty() && !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}
