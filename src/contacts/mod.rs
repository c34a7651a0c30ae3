pub mod api;
pub mod store;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::schema::contacts;

/// A persisted contact row. Only `id` is enforced; every other field is
/// caller-supplied free text, including the foreign-key-shaped ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Identifiable)]
#[diesel(table_name = contacts)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub lead_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<i64>,
    pub role: Option<String>,
    pub address_id: Option<i64>,
    pub contact_rewards_id: Option<i64>,
    pub photo: Option<String>,
    pub notes: Option<String>,
}

/// Create payload. The caller may pin an explicit `id`; `None` lets the
/// sequence assign one. An already-taken id is a conflict, never an
/// overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Insertable)]
#[diesel(table_name = contacts)]
#[serde(rename_all = "camelCase", default)]
pub struct NewContact {
    pub id: Option<i64>,
    pub lead_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<i64>,
    pub role: Option<String>,
    pub address_id: Option<i64>,
    pub contact_rewards_id: Option<i64>,
    pub photo: Option<String>,
    pub notes: Option<String>,
}

impl NewContact {
    pub fn into_contact(self, id: i64) -> Contact {
        Contact {
            id,
            lead_id: self.lead_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            address_id: self.address_id,
            contact_rewards_id: self.contact_rewards_id,
            photo: self.photo,
            notes: self.notes,
        }
    }
}

/// Full-replacement payload for PUT. `treat_none_as_null` makes the update
/// overwrite every column, so fields absent from the body become NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, AsChangeset)]
#[diesel(table_name = contacts, treat_none_as_null = true)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactReplacement {
    pub lead_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<i64>,
    pub role: Option<String>,
    pub address_id: Option<i64>,
    pub contact_rewards_id: Option<i64>,
    pub photo: Option<String>,
    pub notes: Option<String>,
}

impl ContactReplacement {
    pub fn apply_to(&self, contact: &mut Contact) {
        contact.lead_id = self.lead_id.clone();
        contact.name = self.name.clone();
        contact.email = self.email.clone();
        contact.phone = self.phone;
        contact.role = self.role.clone();
        contact.address_id = self.address_id;
        contact.contact_rewards_id = self.contact_rewards_id;
        contact.photo = self.photo.clone();
        contact.notes = self.notes.clone();
    }
}

impl From<Contact> for ContactReplacement {
    fn from(c: Contact) -> Self {
        Self {
            lead_id: c.lead_id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            role: c.role,
            address_id: c.address_id,
            contact_rewards_id: c.contact_rewards_id,
            photo: c.photo,
            notes: c.notes,
        }
    }
}

/// Merge-patch payload for PATCH. Double options keep "not sent" apart
/// from "sent as null": outer `None` skips the column, `Some(None)` sets
/// it to NULL. Diesel's changeset derive honors exactly that split; on the
/// serde side `field_present` only runs when the key appears in the body,
/// so an explicit `null` lands as `Some(None)` instead of collapsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, AsChangeset)]
#[diesel(table_name = contacts)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
    #[serde(deserialize_with = "field_present", skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<Option<String>>,
    #[serde(deserialize_with = "field_present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(deserialize_with = "field_present", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(deserialize_with = "field_present", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<i64>>,
    #[serde(deserialize_with = "field_present", skip_serializing_if = "Option::is_none")]
    pub role: Option<Option<String>>,
    #[serde(deserialize_with = "field_present", skip_serializing_if = "Option::is_none")]
    pub address_id: Option<Option<i64>>,
    #[serde(deserialize_with = "field_present", skip_serializing_if = "Option::is_none")]
    pub contact_rewards_id: Option<Option<i64>>,
    #[serde(deserialize_with = "field_present", skip_serializing_if = "Option::is_none")]
    pub photo: Option<Option<String>>,
    #[serde(deserialize_with = "field_present", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

fn field_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.lead_id.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.address_id.is_none()
            && self.contact_rewards_id.is_none()
            && self.photo.is_none()
            && self.notes.is_none()
    }

    /// Shallow-merge this patch over an existing record. Shared by the
    /// in-memory store and the client's re-fetch-then-replace update.
    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(v) = &self.lead_id {
            contact.lead_id = v.clone();
        }
        if let Some(v) = &self.name {
            contact.name = v.clone();
        }
        if let Some(v) = &self.email {
            contact.email = v.clone();
        }
        if let Some(v) = self.phone {
            contact.phone = v;
        }
        if let Some(v) = &self.role {
            contact.role = v.clone();
        }
        if let Some(v) = self.address_id {
            contact.address_id = v;
        }
        if let Some(v) = self.contact_rewards_id {
            contact.contact_rewards_id = v;
        }
        if let Some(v) = &self.photo {
            contact.photo = v.clone();
        }
        if let Some(v) = &self.notes {
            contact.notes = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Contact {
        Contact {
            id: 1,
            lead_id: Some("L-7".to_string()),
            name: Some("Ana".to_string()),
            email: Some("a@x.com".to_string()),
            phone: Some(5551234),
            role: Some("buyer".to_string()),
            address_id: Some(3),
            contact_rewards_id: None,
            photo: None,
            notes: Some("met at expo".to_string()),
        }
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("leadId").is_some());
        assert!(json.get("addressId").is_some());
        assert!(json.get("contactRewardsId").is_some());
        assert!(json.get("lead_id").is_none());
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: ContactPatch =
            serde_json::from_str(r#"{"name":"Bea","email":null}"#).unwrap();
        assert_eq!(patch.name, Some(Some("Bea".to_string())));
        assert_eq!(patch.email, Some(None));
        assert_eq!(patch.phone, None);

        let mut contact = sample();
        patch.apply_to(&mut contact);
        assert_eq!(contact.name.as_deref(), Some("Bea"));
        assert_eq!(contact.email, None);
        assert_eq!(contact.phone, Some(5551234));
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let patch: ContactPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let mut contact = sample();
        patch.apply_to(&mut contact);
        assert_eq!(contact, sample());
    }

    #[test]
    fn replacement_overwrites_everything() {
        let replacement: ContactReplacement =
            serde_json::from_str(r#"{"name":"Bea"}"#).unwrap();
        let mut contact = sample();
        replacement.apply_to(&mut contact);
        assert_eq!(contact.name.as_deref(), Some("Bea"));
        assert_eq!(contact.email, None);
        assert_eq!(contact.lead_id, None);
        assert_eq!(contact.notes, None);
        assert_eq!(contact.id, 1);
    }
}
