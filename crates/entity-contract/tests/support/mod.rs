#![allow(dead_code)]

use entity_contract::{
    ContractError, Entity, Extractor, FieldSpec, Identifier, MapEncoder, PackValue, Shape,
    WireEnum, WireKeys,
};
use indexmap::IndexMap;
use serde_json::json;

pub fn wire(value: serde_json::Value) -> PackValue {
    PackValue::from(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
    Guest,
}

impl WireEnum for Role {
    type Raw = String;

    fn from_raw(raw: String) -> Option<Self> {
        match raw.as_str() {
            "admin" => Some(Role::Admin),
            "member" => Some(Role::Member),
            "guest" => Some(Role::Guest),
            _ => None,
        }
    }

    fn to_raw(&self) -> String {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Guest => "guest",
        }
        .to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    High,
}

impl WireEnum for Priority {
    type Raw = u8;

    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Priority::Low),
            2 => Some(Priority::High),
            _ => None,
        }
    }

    fn to_raw(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::High => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub zip: Option<String>,
}

impl Entity for Address {
    const NAME: &'static str = "Address";
    const WIRE_KEYS: WireKeys = &[("zip", "postal_code")];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("street", Shape::Str),
        FieldSpec::optional("zip", Shape::Str),
    ];

    fn decode(fields: &Extractor<'_>) -> Result<Self, ContractError> {
        Ok(Self {
            street: fields.required("street")?,
            zip: fields.optional("zip"),
        })
    }

    fn encode(&self, out: &mut MapEncoder<'_>) {
        out.scalar("street", &self.street)
            .optional("zip", self.zip.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Identifier,
    pub display_name: String,
    pub age: u32,
    pub score: f64,
    pub active: bool,
    pub nickname: Option<String>,
    pub avatar: Vec<u8>,
    pub role: Role,
    pub priority: Option<Priority>,
    pub address: Address,
    pub billing: Option<Address>,
    pub previous: Vec<Address>,
    pub labels: IndexMap<String, Address>,
    pub tags: Vec<String>,
}

impl Entity for Profile {
    const NAME: &'static str = "Profile";
    const WIRE_KEYS: WireKeys = &[("display_name", "displayName")];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", Shape::Str),
        FieldSpec::required("display_name", Shape::Str),
        FieldSpec::required("age", Shape::Number),
        FieldSpec::required("score", Shape::Number),
        FieldSpec::required("active", Shape::Bool),
        FieldSpec::optional("nickname", Shape::Str),
        FieldSpec::required("avatar", Shape::Bytes),
        FieldSpec::required("role", Shape::enumeration::<Role>()),
        FieldSpec::optional("priority", Shape::enumeration::<Priority>()),
        FieldSpec::required("address", Shape::entity::<Address>()),
        FieldSpec::optional("billing", Shape::entity::<Address>()),
        FieldSpec::required("previous", Shape::entity_list::<Address>()),
        FieldSpec::required("labels", Shape::entity_map::<Address>()),
        FieldSpec::required("tags", Shape::list_of::<String>()),
    ];

    fn decode(fields: &Extractor<'_>) -> Result<Self, ContractError> {
        Ok(Self {
            id: fields.required("id")?,
            display_name: fields.required("display_name")?,
            age: fields.required("age")?,
            score: fields.required("score")?,
            active: fields.required("active")?,
            nickname: fields.optional("nickname"),
            avatar: fields.required("avatar")?,
            role: fields.enumeration("role")?,
            priority: fields.optional_enumeration("priority")?,
            address: fields.entity("address")?,
            billing: fields.optional_entity("billing")?,
            previous: fields.list("previous")?,
            labels: fields.keyed("labels")?,
            tags: fields.scalar_list("tags")?,
        })
    }

    fn encode(&self, out: &mut MapEncoder<'_>) {
        out.scalar("id", &self.id)
            .scalar("display_name", &self.display_name)
            .scalar("age", &self.age)
            .scalar("score", &self.score)
            .scalar("active", &self.active)
            .optional("nickname", self.nickname.as_ref())
            .scalar("avatar", &self.avatar)
            .enumeration("role", &self.role)
            .optional_enumeration("priority", self.priority.as_ref())
            .entity("address", &self.address)
            .optional_entity("billing", self.billing.as_ref())
            .list("previous", &self.previous)
            .keyed("labels", &self.labels)
            .scalar_list("tags", &self.tags);
    }
}

pub fn home() -> Address {
    Address {
        street: "1 Main St".to_owned(),
        zip: Some("12345".to_owned()),
    }
}

pub fn sample_profile() -> Profile {
    let mut labels = IndexMap::new();
    labels.insert("home".to_owned(), home());
    labels.insert(
        "work".to_owned(),
        Address {
            street: "9 Dock Rd".to_owned(),
            zip: None,
        },
    );
    Profile {
        id: Identifier::new("user-1"),
        display_name: "Ada".to_owned(),
        age: 36,
        score: 9.5,
        active: true,
        nickname: None,
        avatar: vec![0, 1, 2, 255],
        role: Role::Admin,
        priority: Some(Priority::High),
        address: home(),
        billing: None,
        previous: vec![Address {
            street: "2 Old Ln".to_owned(),
            zip: None,
        }],
        labels,
        tags: vec!["a".to_owned(), "b".to_owned()],
    }
}

/// Wire form of [`sample_profile`] with remapping on. JSON has no bytes,
/// so `avatar` is filled in by [`sample_value`].
pub fn sample_wire() -> serde_json::Value {
    json!({
        "id": "user-1",
        "displayName": "Ada",
        "age": 36,
        "score": 9.5,
        "active": true,
        "nickname": null,
        "avatar": null,
        "role": "admin",
        "priority": 2,
        "address": {"street": "1 Main St", "postal_code": "12345"},
        "billing": null,
        "previous": [{"street": "2 Old Ln", "postal_code": null}],
        "labels": {
            "home": {"street": "1 Main St", "postal_code": "12345"},
            "work": {"street": "9 Dock Rd", "postal_code": null}
        },
        "tags": ["a", "b"]
    })
}

/// [`sample_wire`] as a value, with the avatar stored as bytes.
pub fn sample_value() -> PackValue {
    let mut value = wire(sample_wire());
    if let PackValue::Object(obj) = &mut value {
        obj.insert("avatar".to_owned(), PackValue::Bytes(vec![0, 1, 2, 255]));
    }
    value
}
