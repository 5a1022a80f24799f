pub const FIRST_AVATAR: &'static str = "https://picsum.photos/seed/search1/32/32.jpg";
pub const SECOND_AVATAR: &'static str = "https://picsum.photos/seed/search2/32/32.jpg";

#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchEntry {
    pub avatar: String,
    pub username: String,
    pub full_name: String,
}

/// Stand-in for a user search backend: two accounts derived from the query.
pub fn mock_results(query: &str) -> Vec<SearchEntry> {
    vec![
        SearchEntry {
            avatar: FIRST_AVATAR.to_owned(),
            username: format!("user_{}", query),
            full_name: "User Name".to_owned(),
        },
        SearchEntry {
            avatar: SECOND_AVATAR.to_owned(),
            username: format!("{}_official", query),
            full_name: "Official Account".to_owned(),
        },
    ]
}
