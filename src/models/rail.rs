//! Camera rail summary shown in the navigation bar.

use serde::Deserialize;

use super::lenient;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RailStatus {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub length_meters: f64,
    #[serde(deserialize_with = "lenient::list")]
    pub cameras: Vec<RailCamera>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RailCamera {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub state: String,
}

impl RailStatus {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }

    /// "3/4 cameras online"; empty when the rail reports no cameras.
    pub fn camera_summary(&self) -> String {
        if self.cameras.is_empty() {
            return String::new();
        }
        let online = self.cameras.iter().filter(|c| c.state == "online").count();
        format!("{}/{} cameras online", online, self.cameras.len())
    }
}
