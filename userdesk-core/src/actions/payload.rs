//! Decoding of the `POST /api/user-action` body into a [`UserAction`].
//!
//! Decoding is lenient on purpose for every field except the referral
//! count: a missing or mistyped string becomes `""` and a missing or
//! mistyped boolean becomes `false`. The referral count must be a whole
//! JSON number that fits in an `i32`, otherwise the request is rejected
//! before the store is reached.

use serde_json::{Map, Value};

use crate::domain::{FieldUpdate, NewUserRecord};
use crate::error::ValidationError;

/// Which mutation an action tag selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    CreateUser,
    SetPassword,
    SetBlocked,
    SetRenewal,
    SetReferral,
    SetIp,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::CreateUser,
        ActionKind::SetPassword,
        ActionKind::SetBlocked,
        ActionKind::SetRenewal,
        ActionKind::SetReferral,
        ActionKind::SetIp,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::CreateUser => "create-user",
            ActionKind::SetPassword => "set-password",
            ActionKind::SetBlocked => "set-blocked",
            ActionKind::SetRenewal => "set-renewal",
            ActionKind::SetReferral => "set-referral",
            ActionKind::SetIp => "set-ip",
        }
    }

    /// Tag used by the legacy front-end.
    pub fn legacy_tag(self) -> &'static str {
        match self {
            ActionKind::CreateUser => "inserirUsuario",
            ActionKind::SetPassword => "atualizarSenha",
            ActionKind::SetBlocked => "bloquearUsuario",
            ActionKind::SetRenewal => "atualizarRenovacao",
            ActionKind::SetReferral => "atualizarIndicacao",
            ActionKind::SetIp => "atualizarIP",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag || kind.legacy_tag() == tag)
    }
}

/// One decoded mutation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    CreateUser {
        username: String,
        password: String,
        renewal_date: String,
    },
    SetPassword {
        username: String,
        new_password: String,
    },
    SetBlocked {
        username: String,
        is_blocked: bool,
    },
    SetRenewal {
        username: String,
        renewal_date: String,
    },
    SetReferral {
        username: String,
        indicacao: i32,
    },
    SetIp {
        username: String,
        new_ip: String,
    },
}

/// A decoded action together with the tag exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAction {
    pub tag: String,
    pub action: UserAction,
}

/// The single statement an action resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    Insert(NewUserRecord),
    Update {
        username: String,
        update: FieldUpdate,
    },
}

fn string_field(payload: &Map<String, Value>, names: &[&str]) -> String {
    names
        .iter()
        .find_map(|name| payload.get(*name).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

fn bool_field(payload: &Map<String, Value>, names: &[&str]) -> bool {
    names
        .iter()
        .find_map(|name| payload.get(*name).and_then(Value::as_bool))
        .unwrap_or(false)
}

fn referral_field(payload: &Map<String, Value>) -> Result<i32, ValidationError> {
    let value = payload
        .get("indicacao")
        .ok_or(ValidationError::InvalidReferralCount)?;

    if let Some(whole) = value.as_i64() {
        return i32::try_from(whole)
            .map_err(|_| ValidationError::InvalidReferralCount);
    }

    match value.as_f64() {
        Some(number)
            if number.fract() == 0.0
                && number >= f64::from(i32::MIN)
                && number <= f64::from(i32::MAX) =>
        {
            Ok(number as i32)
        }
        _ => Err(ValidationError::InvalidReferralCount),
    }
}

impl UserAction {
    /// Parse a raw request body.
    pub fn parse_body(body: &[u8]) -> Result<DecodedAction, ValidationError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| ValidationError::InvalidBody)?;
        Self::from_payload(&value)
    }

    /// Decode an already-parsed JSON payload.
    pub fn from_payload(payload: &Value) -> Result<DecodedAction, ValidationError> {
        let payload = payload.as_object().ok_or(ValidationError::InvalidBody)?;

        let tag = string_field(payload, &["action"]);
        let kind = ActionKind::from_tag(&tag)
            .ok_or_else(|| ValidationError::UnknownAction(tag.clone()))?;
        let username = string_field(payload, &["username"]);

        let action = match kind {
            ActionKind::CreateUser => UserAction::CreateUser {
                username,
                password: string_field(payload, &["password"]),
                renewal_date: string_field(payload, &["renewalDate", "renewal_date"]),
            },
            ActionKind::SetPassword => UserAction::SetPassword {
                username,
                new_password: string_field(payload, &["newPassword", "new_password"]),
            },
            ActionKind::SetBlocked => UserAction::SetBlocked {
                username,
                is_blocked: bool_field(payload, &["isBlocked", "is_blocked"]),
            },
            ActionKind::SetRenewal => UserAction::SetRenewal {
                username,
                renewal_date: string_field(payload, &["renewalDate", "renewal_date"]),
            },
            ActionKind::SetReferral => UserAction::SetReferral {
                username,
                indicacao: referral_field(payload)?,
            },
            ActionKind::SetIp => UserAction::SetIp {
                username,
                new_ip: string_field(payload, &["newIp", "novo_ip"]),
            },
        };

        Ok(DecodedAction { tag, action })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            UserAction::CreateUser { .. } => ActionKind::CreateUser,
            UserAction::SetPassword { .. } => ActionKind::SetPassword,
            UserAction::SetBlocked { .. } => ActionKind::SetBlocked,
            UserAction::SetRenewal { .. } => ActionKind::SetRenewal,
            UserAction::SetReferral { .. } => ActionKind::SetReferral,
            UserAction::SetIp { .. } => ActionKind::SetIp,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            UserAction::CreateUser { username, .. }
            | UserAction::SetPassword { username, .. }
            | UserAction::SetBlocked { username, .. }
            | UserAction::SetRenewal { username, .. }
            | UserAction::SetReferral { username, .. }
            | UserAction::SetIp { username, .. } => username,
        }
    }

    pub fn into_command(self) -> StoreCommand {
        match self {
            UserAction::CreateUser {
                username,
                password,
                renewal_date,
            } => StoreCommand::Insert(NewUserRecord {
                username,
                password,
                renewal_date,
            }),
            UserAction::SetPassword {
                username,
                new_password,
            } => StoreCommand::Update {
                username,
                update: FieldUpdate::Password(new_password),
            },
            UserAction::SetBlocked {
                username,
                is_blocked,
            } => StoreCommand::Update {
                username,
                update: FieldUpdate::Blocked(is_blocked),
            },
            UserAction::SetRenewal {
                username,
                renewal_date,
            } => StoreCommand::Update {
                username,
                update: FieldUpdate::RenewalDate(renewal_date),
            },
            UserAction::SetReferral {
                username,
                indicacao,
            } => StoreCommand::Update {
                username,
                update: FieldUpdate::ReferralCount(indicacao),
            },
            UserAction::SetIp { username, new_ip } => StoreCommand::Update {
                username,
                update: FieldUpdate::Ip(new_ip),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<UserAction, ValidationError> {
        UserAction::from_payload(&value).map(|decoded| decoded.action)
    }

    #[test]
    fn decodes_create_user() {
        let action = decode(json!({
            "action": "create-user",
            "username": "bob",
            "password": "p",
            "renewalDate": "2025-01-01"
        }))
        .expect("valid payload");

        assert_eq!(
            action.into_command(),
            StoreCommand::Insert(NewUserRecord {
                username: "bob".into(),
                password: "p".into(),
                renewal_date: "2025-01-01".into(),
            })
        );
    }

    #[test]
    fn missing_and_mistyped_fields_default_to_zero_values() {
        let action = decode(json!({
            "action": "set-blocked",
            "username": "alice",
            "isBlocked": "yes"
        }))
        .expect("lenient decode");
        assert_eq!(
            action,
            UserAction::SetBlocked {
                username: "alice".into(),
                is_blocked: false
            }
        );

        let action = decode(json!({ "action": "set-password" })).expect("lenient decode");
        assert_eq!(
            action,
            UserAction::SetPassword {
                username: String::new(),
                new_password: String::new()
            }
        );
    }

    #[test]
    fn referral_count_accepts_whole_numbers_only() {
        let ok = decode(json!({ "action": "set-referral", "username": "a", "indicacao": 4 }));
        assert_eq!(
            ok,
            Ok(UserAction::SetReferral {
                username: "a".into(),
                indicacao: 4
            })
        );

        let float_whole =
            decode(json!({ "action": "set-referral", "username": "a", "indicacao": 4.0 }));
        assert!(matches!(
            float_whole,
            Ok(UserAction::SetReferral { indicacao: 4, .. })
        ));

        for bad in [json!(3.5), json!("3"), json!(null), json!(4_294_967_296_i64)] {
            let result =
                decode(json!({ "action": "set-referral", "username": "a", "indicacao": bad }));
            assert_eq!(result, Err(ValidationError::InvalidReferralCount));
        }

        let missing = decode(json!({ "action": "set-referral", "username": "a" }));
        assert_eq!(missing, Err(ValidationError::InvalidReferralCount));
    }

    #[test]
    fn unknown_or_missing_tag_is_rejected() {
        assert_eq!(
            decode(json!({ "action": "deleteEverything", "username": "a" })),
            Err(ValidationError::UnknownAction("deleteEverything".into()))
        );
        assert_eq!(
            decode(json!({ "username": "a" })),
            Err(ValidationError::UnknownAction(String::new()))
        );
    }

    #[test]
    fn legacy_tags_and_field_names_are_accepted() {
        let decoded = UserAction::from_payload(&json!({
            "action": "atualizarIP",
            "username": "alice",
            "novo_ip": "10.0.0.1"
        }))
        .expect("legacy payload");

        assert_eq!(decoded.tag, "atualizarIP");
        assert_eq!(
            decoded.action,
            UserAction::SetIp {
                username: "alice".into(),
                new_ip: "10.0.0.1".into()
            }
        );
    }

    #[test]
    fn body_must_be_a_json_object() {
        assert_eq!(
            UserAction::parse_body(b"{not json"),
            Err(ValidationError::InvalidBody)
        );
        assert_eq!(
            UserAction::parse_body(b"[1, 2]"),
            Err(ValidationError::InvalidBody)
        );
    }
}
