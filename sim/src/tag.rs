use crate::registry::EntityId;

/// Opaque per-collider marker that lets a contact report be mapped back to an entity.
///
/// Tags live in the collider's `user_data` (a `u128`), so the layout is a storage format:
///
/// - bits 0..=31  : entity id (u32)
/// - bits 32..=39 : [`TAG_MARKER`], identifies the value as an entity tag
/// - bits 40..=127: reserved (must be zero)
///
/// Colliders that were never tagged keep rapier's default `user_data` of 0, which never
/// resolves to an entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyTag(u128);

/// Marker byte for entity tags.
pub const TAG_MARKER: u8 = 0x5a;

impl BodyTag {
    /// Tag for a registered entity.
    pub fn for_entity(id: EntityId) -> Self {
        Self((id.get() as u128) | ((TAG_MARKER as u128) << u32::BITS))
    }

    /// Wrap a raw `user_data` value read back from a collider.
    pub fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u128 {
        self.0
    }

    /// The entity this tag refers to, if it is a well-formed entity tag.
    pub fn entity(self) -> Option<EntityId> {
        if self.0 >> (u32::BITS + u8::BITS) != 0 {
            return None;
        }
        let marker = (self.0 >> u32::BITS) as u8;
        if marker != TAG_MARKER {
            return None;
        }
        Some(EntityId::new(self.0 as u32))
    }
}
