//! A CID travels through serde as its string form, so a JSON document holds
//! the same quoted text that [`Cid::marshal_json`](crate::CidGeneric::marshal_json)
//! writes.

use core::{
  fmt,
  marker::PhantomData,
};

use multihash::Size;
use serde::{
  de,
  Deserialize,
  Deserializer,
  Serialize,
  Serializer,
};

use crate::cid::Cid;

impl<S: Size> Serialize for Cid<S> {
  fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
  where Ser: Serializer {
    serializer.collect_str(self)
  }
}

struct CidVisitor<S: Size>(PhantomData<S>);

impl<'de, S: Size> de::Visitor<'de> for CidVisitor<S> {
  type Value = Cid<S>;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a cid string")
  }

  fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
  where E: de::Error {
    Cid::decode(v).map_err(E::custom)
  }
}

impl<'de, S: Size> Deserialize<'de> for Cid<S> {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where D: Deserializer<'de> {
    deserializer.deserialize_str(CidVisitor(PhantomData))
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    Cid,
    Prefix,
  };
  use multihash::{
    Code,
    MultihashDigest,
  };

  #[test]
  fn cid_serde_is_marshal_json() {
    let cid = Cid::new_v1(0x71, Code::Sha2_256.digest(b"serde"));
    let json = serde_json::to_vec(&cid).unwrap();
    assert_eq!(json, cid.marshal_json());
    let back: Cid = serde_json::from_slice(&json).unwrap();
    assert_eq!(back, cid);
  }

  #[test]
  fn legacy_cid_in_a_document() {
    let doc = r#"{"link":"QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zR1n"}"#;
    let value: std::collections::BTreeMap<String, Cid> =
      serde_json::from_str(doc).unwrap();
    assert_eq!(
      value["link"].to_string(),
      "QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zR1n"
    );
    assert_eq!(serde_json::to_string(&value).unwrap(), doc);
  }

  #[test]
  fn bad_cid_string_is_a_serde_error() {
    let err = serde_json::from_str::<Cid>("\"zzzz\"");
    assert!(err.is_err());
    assert!(serde_json::from_str::<Cid>("42").is_err());
  }

  #[test]
  fn prefix_serde() {
    let pref = Prefix::new(1, 0x71, 0x12, 32);
    let json = serde_json::to_string(&pref).unwrap();
    assert_eq!(json, r#"{"version":1,"codec":113,"mh_type":18,"mh_len":32}"#);
    assert_eq!(serde_json::from_str::<Prefix>(&json).unwrap(), pref);
  }
}
