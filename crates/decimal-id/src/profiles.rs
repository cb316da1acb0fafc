//! Batch conversion of Steam user profiles.
//!
//! Steam's `ISteamUser/GetPlayerSummaries` endpoint only returns SteamID64s. Game APIs
//! tend to key players by account ID instead, so every profile gets one attached here
//! before it is handed to whatever displays it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{ConversionError, Digits, Direction, Strategy};

/// A single player object, as returned by Steam.
///
/// Fields this type does not know about are kept in [`Profile::extra`] and serialized
/// back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// The SteamID64, exactly as Steam sent it.
    ///
    /// This is only validated by [`attach_account_ids()`], so a single bad record does not
    /// prevent the rest of the batch from being parsed.
    #[serde(
        default,
        deserialize_with = "deserialize_raw_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub steamid: Option<String>,

    /// Derived from [`Profile::steamid`] by [`attach_account_ids()`].
    #[serde(
        default,
        deserialize_with = "Digits::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_id: Option<Digits>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personaname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profileurl: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loccountrycode: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `GetPlayerSummaries` response body.
///
/// Both the `{"response":{"players":[...]}}` envelope and a bare array of players are
/// accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSummaries {
    players: Vec<Profile>,
}

/// Outcome of [`attach_account_ids()`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Profiles that received an account ID.
    pub converted: usize,

    /// Profiles without a SteamID.
    pub absent: usize,

    /// Profiles whose SteamID could not be converted.
    pub failed: usize,
}

impl PlayerSummaries {
    pub fn into_profiles(self) -> Vec<Profile> {
        self.players
    }
}

impl<'de> Deserialize<'de> for PlayerSummaries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper1 {
            Bare(Vec<Profile>),
            Wrapped { response: Helper2 },
        }

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Helper2 {
            players: Vec<Profile>,
        }

        Helper1::deserialize(deserializer).map(|helper| match helper {
            Helper1::Bare(players) | Helper1::Wrapped { response: Helper2 { players } } => {
                Self { players }
            }
        })
    }
}

/// Accepts any JSON value, keeping strings as-is and rendering everything else as text.
fn deserialize_raw_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(id),
        Some(value) => Some(value.to_string()),
    })
}

/// Derives [`Profile::account_id`] from [`Profile::steamid`] for every profile.
///
/// A SteamID that cannot be converted leaves the account ID empty and is counted in
/// [`BatchReport::failed`]; it does not stop the remaining profiles from being processed.
#[tracing::instrument(level = "debug", skip(profiles), fields(profiles = profiles.len()), ret)]
pub fn attach_account_ids(profiles: &mut [Profile], strategy: Strategy) -> BatchReport {
    let mut report = BatchReport::default();

    for profile in &mut *profiles {
        profile.account_id = match strategy.to_narrow_id(profile.steamid.as_deref()) {
            Ok(Some(account_id)) => {
                report.converted += 1;
                Some(account_id)
            }
            Ok(None) => {
                report.absent += 1;
                None
            }
            Err(error) => {
                tracing::warn!(
                    steamid = ?profile.steamid,
                    personaname = ?profile.personaname,
                    %error,
                    "failed to derive account id",
                );

                report.failed += 1;
                None
            }
        };
    }

    report
}

/// Converts every identifier in `ids`, producing one result per input.
pub fn convert_all<'a, I>(
    ids: I,
    direction: Direction,
    strategy: Strategy,
) -> Vec<Result<Option<Digits>, ConversionError>>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    ids.into_iter()
        .map(|id| direction.apply(id, strategy))
        .collect()
}
