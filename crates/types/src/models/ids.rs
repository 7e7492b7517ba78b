//! Random hex identifier helpers.
//!
//! Subscriptions, yield positions and multi-sig proposals carry opaque hex
//! ids that are never parsed back into bytes, so plain strings suffice.

/// 16 random bytes (a v4 UUID), hex-encoded: 32 characters.
pub fn hex_id_16() -> String {
	hex::encode(uuid::Uuid::new_v4().as_bytes())
}

/// 32 random bytes, hex-encoded: 64 characters.
pub fn hex_id_32() -> String {
	let bytes: [u8; 32] = rand::random();
	hex::encode(bytes)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn id_lengths() {
		assert_eq!(hex_id_16().len(), 32);
		assert_eq!(hex_id_32().len(), 64);
	}

	#[test]
	fn ids_are_unique() {
		assert_ne!(hex_id_16(), hex_id_16());
		assert_ne!(hex_id_32(), hex_id_32());
	}
}
