use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Raw snapshot row; calendar tokens are validated by the importer so that row numbers can be
/// reported.
#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotRow {
    pub(crate) id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) section: Option<String>,
    pub(crate) lecturer_id: String,
    #[serde(default)]
    pub(crate) lecturer_name: String,
    #[serde(default)]
    pub(crate) faculty: String,
    #[serde(default)]
    pub(crate) course: String,
    pub(crate) course_code: String,
    pub(crate) block: String,
    pub(crate) room: String,
    pub(crate) time_slot: String,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<SnapshotRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<SnapshotRow>()
        .collect::<Result<Vec<_>, _>>()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
