use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One observed player at snapshot time.
///
/// Records inside a snapshot are independent; nothing enforces name
/// uniqueness here (the ingest side keys by name, but a published snapshot
/// may carry duplicates and they pass through queries untouched).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// `None` for anonymous players - the `/who` output withholds their
    /// level, and the wire format carries `null`.
    pub level: Option<u32>,
    #[serde(rename = "class")]
    pub class_name: String,
    pub name: String,
    pub race: String,
    #[serde(default, deserialize_with = "de_nullable_string")]
    pub guild: String,
    pub zone: String,
    #[serde(default, deserialize_with = "de_flag")]
    pub lfg: bool,
    #[serde(with = "wire_timestamp")]
    pub last_updated: NaiveDateTime,
}

/// Accept `0`/`1` as well as booleans - upstream publishers that keep the
/// flag in a SQL column emit integers.
fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}

/// Accept `null` for guildless players.
fn de_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Record timestamps travel as `"YYYY-MM-DD HH:MM:SS[.ffffff]"` - the
/// space-separated form the upstream SQL dump produces. ISO `T` separators
/// are accepted on read for tolerance.
pub mod wire_timestamp {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
    const READ_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(WRITE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        READ_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(&raw, f).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp '{raw}'")))
    }
}
