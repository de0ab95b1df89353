//! Typed side-data attached to events.
//!
//! A payload is written as a JSON object carrying a `type` tag next to the
//! variant's own fields:
//!
//! ```json
//! { "type": "DiscordEventData", "guildId": 1, "channelId": 2, ... }
//! ```
//!
//! Decoding looks the tag up in a process-wide registry. The built-in variants
//! are always present; other variants must call [`register`] before any record
//! carrying their tag is read, otherwise the record fails to decode.

mod chat;
mod default;

pub use chat::ChatPayload;
pub use default::DefaultPayload;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{DayCalError, DayCalResult};

/// Name of the field holding the variant tag.
pub const TAG_FIELD: &str = "type";

/// A concrete payload shape.
///
/// `TAG` is persisted in every record and must never change once records
/// exist. The variant must serialize to a JSON object.
pub trait PayloadVariant:
    Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static
{
    const TAG: &'static str;
}

/// Object-safe view of a [`PayloadVariant`].
trait ErasedPayload: fmt::Debug + Send + Sync {
    fn tag(&self) -> &'static str;
    fn to_value(&self) -> serde_json::Result<Value>;
    fn clone_box(&self) -> Box<dyn ErasedPayload>;
    fn as_any(&self) -> &dyn Any;
}

impl<T: PayloadVariant> ErasedPayload for T {
    fn tag(&self) -> &'static str {
        T::TAG
    }

    fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn clone_box(&self) -> Box<dyn ErasedPayload> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An event payload of any registered variant.
pub struct Payload(Box<dyn ErasedPayload>);

impl Payload {
    pub fn new<T: PayloadVariant>(variant: T) -> Self {
        Payload(Box::new(variant))
    }

    pub fn tag(&self) -> &'static str {
        self.0.tag()
    }

    pub fn is<T: PayloadVariant>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    pub fn downcast_ref<T: PayloadVariant>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Encode as a tagged JSON object.
    pub fn to_value(&self) -> DayCalResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Decode a tagged JSON object through the registry.
    pub fn from_value(value: Value) -> DayCalResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl<T: PayloadVariant> From<T> for Payload {
    fn from(variant: T) -> Self {
        Payload::new(variant)
    }
}

impl Clone for Payload {
    fn clone(&self) -> Self {
        Payload(self.0.clone_box())
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
            && match (self.0.to_value(), other.0.to_value()) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            }
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tag = self.tag();
        let fields = match self.0.to_value().map_err(S::Error::custom)? {
            Value::Object(fields) => fields,
            other => {
                return Err(S::Error::custom(format!(
                    "payload '{tag}' must serialize to an object, got {other}"
                )));
            }
        };

        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        map.serialize_entry(TAG_FIELD, tag)?;
        for (key, value) in fields.iter().filter(|(key, _)| *key != TAG_FIELD) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;

        let tag = match fields.remove(TAG_FIELD) {
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "payload tag must be a string, got {other}"
                )));
            }
            None => return Err(D::Error::missing_field(TAG_FIELD)),
        };

        decode(&tag, Value::Object(fields)).map_err(D::Error::custom)
    }
}

// =============================================================================
// Registry
// =============================================================================

type DecodeFn = fn(Value) -> serde_json::Result<Payload>;

fn decode_variant<T: PayloadVariant>(value: Value) -> serde_json::Result<Payload> {
    serde_json::from_value::<T>(value).map(Payload::new)
}

fn registry() -> &'static RwLock<HashMap<&'static str, DecodeFn>> {
    static REGISTRY: OnceLock<RwLock<HashMap<&'static str, DecodeFn>>> = OnceLock::new();

    REGISTRY.get_or_init(|| {
        let mut decoders: HashMap<&'static str, DecodeFn> = HashMap::new();
        decoders.insert(DefaultPayload::TAG, decode_variant::<DefaultPayload>);
        decoders.insert(ChatPayload::TAG, decode_variant::<ChatPayload>);
        RwLock::new(decoders)
    })
}

/// Make `T` decodable. Returns false if its tag was already registered, in
/// which case the existing decoder is kept.
pub fn register<T: PayloadVariant>() -> bool {
    let mut decoders = registry().write().unwrap_or_else(PoisonError::into_inner);

    if decoders.contains_key(T::TAG) {
        return false;
    }
    decoders.insert(T::TAG, decode_variant::<T>);
    tracing::debug!("Registered payload type '{}'", T::TAG);
    true
}

pub fn is_registered(tag: &str) -> bool {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(tag)
}

/// All registered tags, sorted.
pub fn registered_tags() -> Vec<&'static str> {
    let mut tags: Vec<_> = registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .copied()
        .collect();
    tags.sort();
    tags
}

fn decode(tag: &str, value: Value) -> DayCalResult<Payload> {
    let decoder = registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(tag)
        .copied()
        .ok_or_else(|| DayCalError::Serialization(format!("Unregistered payload type '{tag}'")))?;

    Ok(decoder(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct WebhookPayload {
        url: String,
    }

    impl PayloadVariant for WebhookPayload {
        const TAG: &'static str = "WebhookEventData";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct NeverRegistered {
        value: u8,
    }

    impl PayloadVariant for NeverRegistered {
        const TAG: &'static str = "NeverRegisteredEventData";
    }

    #[test]
    fn test_builtin_variants_are_registered() {
        assert!(is_registered("DefaultEventData"));
        assert!(is_registered("DiscordEventData"));
        assert!(registered_tags().contains(&"DiscordEventData"));
    }

    #[test]
    fn test_encode_writes_tag_alongside_fields() {
        let payload = Payload::new(DefaultPayload::with_link("https://example.com"));
        let value = payload.to_value().unwrap();

        assert_eq!(
            value,
            json!({ "type": "DefaultEventData", "providedLink": "https://example.com" })
        );
    }

    #[test]
    fn test_decode_dispatches_on_tag() {
        let value = json!({
            "type": "DiscordEventData",
            "guildId": 1,
            "channelId": 2,
            "originMessageId": 3,
            "authorId": 666,
            "providedLink": null,
            "mentionEveryone": true
        });

        let payload = Payload::from_value(value).unwrap();
        let chat = payload.downcast_ref::<ChatPayload>().expect("Should be a chat payload");

        assert_eq!(chat.guild_id, 1);
        assert_eq!(chat.author_id, 666);
        assert!(chat.mention_everyone);
        assert!(!payload.is::<DefaultPayload>());
    }

    #[test]
    fn test_unregistered_tag_fails_to_decode() {
        let value = json!({ "type": "NeverRegisteredEventData", "value": 1 });

        let err = Payload::from_value(value).unwrap_err();
        assert!(err.to_string().contains("NeverRegisteredEventData"));
        assert!(!is_registered(NeverRegistered::TAG));
    }

    #[test]
    fn test_missing_tag_fails_to_decode() {
        assert!(Payload::from_value(json!({ "providedLink": "x" })).is_err());
    }

    #[test]
    fn test_registered_variant_decodes() {
        register::<WebhookPayload>();
        assert!(!register::<WebhookPayload>());

        let original = Payload::new(WebhookPayload {
            url: "https://hooks.example.com/1".to_string(),
        });
        let decoded = Payload::from_value(original.to_value().unwrap()).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(decoded.tag(), "WebhookEventData");
    }

    #[test]
    fn test_equality_compares_tag_and_fields() {
        let a = Payload::new(DefaultPayload::with_link("a"));
        let b = Payload::new(DefaultPayload::with_link("b"));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(Payload::new(DefaultPayload::default()), Payload::new(ChatPayload::default()));
    }
}
