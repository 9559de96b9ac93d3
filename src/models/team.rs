use serde::{Deserialize, Serialize};

const DEFAULT_TEAM_COUNT: u32 = 35;
const DEFAULT_TEAM_YEAR: u32 = 2024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u32,
    pub team_name: String,
    pub year: u32,
    pub representative: String,
    pub email: String,
    pub category: String,
    pub note: String,
    pub additional_email: String,
}

impl Team {
    /// The built-in list restored by `POST /api/teams/reset-to-defaults`.
    pub fn defaults() -> Vec<Team> {
        (1..=DEFAULT_TEAM_COUNT)
            .map(|id| Team {
                id,
                team_name: format!("Team {id}"),
                year: DEFAULT_TEAM_YEAR,
                representative: "Representative".to_string(),
                email: "email@example.com".to_string(),
                category: "Category".to_string(),
                note: "Note".to_string(),
                additional_email: String::new(),
            })
            .collect()
    }
}
