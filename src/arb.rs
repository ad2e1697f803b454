use multihash::{
  Code,
  Multihash,
  MultihashDigest,
};
use quickcheck::{
  Arbitrary,
  Gen,
};
use rand::{
  distributions::{
    Distribution,
    WeightedIndex,
  },
  Rng,
};

use crate::{
  Cid,
  Prefix,
  Version,
};

const CODES: [Code; 7] = [
  Code::Sha2_256,
  Code::Sha2_512,
  Code::Sha3_256,
  Code::Sha3_512,
  Code::Blake2b256,
  Code::Blake2s256,
  Code::Blake3_256,
];

impl Arbitrary for Version {
  fn arbitrary(_: &mut Gen) -> Self {
    if rand::thread_rng().gen_bool(0.7) { Version::V1 } else { Version::V0 }
  }
}

/// A codec biased towards small values, as real world codec tags are, while
/// still reaching the 10 byte varints.
fn arbitrary_codec() -> u64 {
  let mut rng = rand::thread_rng();
  let weights = [128, 32, 4, 4, 2, 2, 1, 1];
  let dist = match WeightedIndex::new(weights.iter()) {
    Ok(dist) => dist,
    Err(_) => return 0x71,
  };
  match dist.sample(&mut rng) {
    0 => rng.gen_range(0..u64::pow(2, 7)),
    1 => rng.gen_range(u64::pow(2, 7)..u64::pow(2, 14)),
    2 => rng.gen_range(u64::pow(2, 14)..u64::pow(2, 21)),
    3 => rng.gen_range(u64::pow(2, 21)..u64::pow(2, 28)),
    4 => rng.gen_range(u64::pow(2, 28)..u64::pow(2, 35)),
    5 => rng.gen_range(u64::pow(2, 35)..u64::pow(2, 42)),
    6 => rng.gen_range(u64::pow(2, 42)..u64::pow(2, 49)),
    _ => rng.gen_range(u64::pow(2, 56)..=u64::MAX),
  }
}

/// A multihash over arbitrary data, sometimes truncated.
fn arbitrary_hash(g: &mut Gen) -> Multihash {
  let data: Vec<u8> = Arbitrary::arbitrary(g);
  let code = g.choose(&CODES).copied().unwrap_or(Code::Sha2_256);
  let full = code.digest(&data);
  let mut rng = rand::thread_rng();
  if rng.gen_bool(0.8) {
    return full;
  }
  let len = rng.gen_range(1..=full.digest().len());
  Multihash::wrap(full.code(), &full.digest()[..len]).unwrap_or(full)
}

impl Arbitrary for Cid {
  fn arbitrary(g: &mut Gen) -> Self {
    match Version::arbitrary(g) {
      Version::V0 => {
        let data: Vec<u8> = Arbitrary::arbitrary(g);
        Cid::new_v0(Code::Sha2_256.digest(&data))
      }
      Version::V1 => Cid::new_v1(arbitrary_codec(), arbitrary_hash(g)),
    }
  }
}

impl Arbitrary for Prefix {
  fn arbitrary(g: &mut Gen) -> Self {
    Prefix::new(
      Arbitrary::arbitrary(g),
      Arbitrary::arbitrary(g),
      Arbitrary::arbitrary(g),
      Arbitrary::arbitrary(g),
    )
  }
}
