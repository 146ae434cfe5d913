//! Hash containers used by the runtime tables.

use core::any::TypeId;
use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

pub(crate) use hashbrown::HashMap;

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// Hash state with results that only depend on the input.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

pub(crate) type FixedHashMap<K, V> = HashMap<K, V, FixedHashState>;

pub(crate) type TypeIdMap<V> = FixedHashMap<TypeId, V>;
