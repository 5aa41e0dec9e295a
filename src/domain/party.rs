//! Party identification for payer and payee.

use serde::{Deserialize, Serialize};

/// Kind of party identifier understood by the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyIdType {
    Msisdn,
    PersonalId,
}

/// Payer or payee party: who is identified, and by which FSP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id_type: PartyIdType,
    pub id_value: String,
    pub fsp_id: String,
}

impl Party {
    /// A party identified by its mobile number.
    pub fn msisdn(id_value: impl Into<String>, fsp_id: impl Into<String>) -> Self {
        Self {
            id_type: PartyIdType::Msisdn,
            id_value: id_value.into(),
            fsp_id: fsp_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_uses_fspiop_field_names() {
        let party = Party::msisdn("22912345678", "payer-dfsp");
        let json = serde_json::to_value(&party).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "idType": "MSISDN",
                "idValue": "22912345678",
                "fspId": "payer-dfsp",
            })
        );
    }

    #[test]
    fn personal_id_round_trips_through_its_wire_name() {
        let parsed: PartyIdType = serde_json::from_str("\"PERSONAL_ID\"").unwrap();
        assert_eq!(parsed, PartyIdType::PersonalId);
    }
}
