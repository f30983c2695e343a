//! Data models shared across repositories and services.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document: its identifier and the JSON body persisted under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    /// Merges the identifier into the body, the shape clients receive.
    pub fn into_body(self) -> Value {
        let mut fields = match self.data {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        fields.insert("id".to_string(), Value::String(self.id));
        Value::Object(fields)
    }
}

/// An account as persisted: email plus the bcrypt hash of the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub courriel: String,
    pub mdp: String,
}

/// Account listing entry with the password hash redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilisateurPublic {
    pub id: String,
    pub courriel: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_body_merges_the_identifier() {
        let document = Document {
            id: "abc".to_string(),
            data: json!({ "titre": "Incendies", "annee": "2010" }),
        };

        assert_eq!(
            document.into_body(),
            json!({ "id": "abc", "titre": "Incendies", "annee": "2010" })
        );
    }

    #[test]
    fn into_body_keeps_the_stored_id_over_a_data_field() {
        let document = Document {
            id: "real".to_string(),
            data: json!({ "id": "forged" }),
        };

        assert_eq!(document.into_body()["id"], "real");
    }
}
