//! Vertex data packing utilities
//!
//! Converts full-precision f32 vertex attributes to packed GPU formats:
//! - position f32x3 → f16x4
//! - UV f32x2 → unorm16x2
//! - normal/tangent f32x3 → octahedral u32 (2x snorm16)
//!
//! The generator always works in f32; packing only happens at the sink.

use bytemuck::cast_slice;
use glam::{Vec2, Vec3};
use half::f16;

// ============================================================================
// Vertex Format Constants
// ============================================================================

/// Vertex format flag: Has UV coordinates
pub const FORMAT_UV: u8 = 1;
/// Vertex format flag: Has normals
pub const FORMAT_NORMAL: u8 = 4;
/// Vertex format flag: Has tangents (requires UV and normal)
pub const FORMAT_TANGENT: u8 = 16;

/// Position + UV + normal + tangent, the layout the cylinder sinks emit
pub const FORMAT_POS_UV_NORMAL_TANGENT: u8 = FORMAT_UV | FORMAT_NORMAL | FORMAT_TANGENT;

/// Bit carrying the bitangent handedness inside a packed tangent
const TANGENT_HANDEDNESS_BIT: u32 = 1 << 16;

/// Calculate vertex stride in bytes for packed GPU format
#[inline]
pub const fn vertex_stride_packed(format: u8) -> u32 {
    let mut stride = 8; // Position: Float16x4

    if format & FORMAT_UV != 0 {
        stride += 4; // Unorm16x2
    }
    if format & FORMAT_NORMAL != 0 {
        stride += 4; // Octahedral u32
    }
    if format & FORMAT_TANGENT != 0 {
        stride += 4; // Octahedral u32 + handedness bit
    }

    stride
}

// ============================================================================
// Basic Conversion Functions
// ============================================================================

/// Convert f32 to signed normalized 16-bit integer (snorm16)
///
/// Maps f32 range [-1.0, 1.0] to i16 range [-32767, 32767].
#[inline]
pub fn f32_to_snorm16(value: f32) -> i16 {
    let clamped = value.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}

/// Convert f32 to unsigned normalized 16-bit integer (unorm16)
#[inline]
pub fn f32_to_unorm16(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * 65535.0) as u16
}

// ============================================================================
// Position / UV Packing
// ============================================================================

/// Pack a 3D position to Float16x4 format (with w=1.0 padding)
#[inline]
pub fn pack_position_f16(position: Vec3) -> [f16; 4] {
    [
        f16::from_f32(position.x),
        f16::from_f32(position.y),
        f16::from_f32(position.z),
        f16::from_f32(1.0),
    ]
}

/// Pack a UV coordinate to Unorm16x2 format
///
/// Values outside [0.0, 1.0] are clamped.
#[inline]
pub fn pack_uv_unorm16(uv: Vec2) -> [u16; 2] {
    [f32_to_unorm16(uv.x), f32_to_unorm16(uv.y)]
}

// ============================================================================
// Direction Packing
// ============================================================================

/// Component-wise sign, treating zero as positive
#[inline]
fn sign_not_zero(v: Vec2) -> Vec2 {
    Vec2::select(v.cmpge(Vec2::ZERO), Vec2::ONE, Vec2::NEG_ONE)
}

/// Map a direction onto the octahedral square [-1, 1]²
///
/// The upper hemisphere projects straight down onto the inner diamond; the
/// lower hemisphere is folded out over the corners. Zero maps to the origin.
#[inline]
pub fn encode_octahedral(dir: Vec3) -> Vec2 {
    let l1_norm = dir.abs().element_sum();
    if l1_norm == 0.0 || !l1_norm.is_finite() {
        return Vec2::ZERO;
    }

    let p = dir.truncate() / l1_norm;
    if dir.z >= 0.0 {
        p
    } else {
        (Vec2::ONE - Vec2::new(p.y, p.x).abs()) * sign_not_zero(p)
    }
}

/// Inverse of [`encode_octahedral`], returning a unit direction
#[inline]
pub fn decode_octahedral(oct: Vec2) -> Vec3 {
    let z = 1.0 - oct.abs().element_sum();
    // Unfold the corners back into the lower hemisphere
    let fold = (-z).max(0.0);
    let xy = oct - sign_not_zero(oct) * fold;
    xy.extend(z).normalize_or_zero()
}

/// Pack a direction as two snorm16 values: x in the low half, y in the high half
///
/// A zero vector packs to 0 and decodes to +Z; callers that care about
/// degenerate normals must track them separately.
#[inline]
pub fn pack_octahedral_u32(dir: Vec3) -> u32 {
    let oct = encode_octahedral(dir);
    let [u, v] = [oct.x, oct.y].map(|c| f32_to_snorm16(c) as u16 as u32);
    u | (v << 16)
}

/// Unpack a direction written by [`pack_octahedral_u32`]
#[inline]
pub fn unpack_octahedral_u32(packed: u32) -> Vec3 {
    let [u, v] = [packed as u16, (packed >> 16) as u16].map(|c| c as i16 as f32 / 32767.0);
    decode_octahedral(Vec2::new(u, v))
}

/// Pack a tangent with its bitangent handedness (+1.0 / -1.0)
///
/// Same layout as a packed normal, with the lowest bit of the v component
/// replaced by the handedness flag (set = negative).
#[inline]
pub fn pack_tangent(tangent: Vec3, handedness: f32) -> u32 {
    let packed = pack_octahedral_u32(tangent) & !TANGENT_HANDEDNESS_BIT;
    if handedness < 0.0 {
        packed | TANGENT_HANDEDNESS_BIT
    } else {
        packed
    }
}

/// Unpack a tangent into (direction, handedness)
#[inline]
pub fn unpack_tangent(packed: u32) -> (Vec3, f32) {
    let handedness = if packed & TANGENT_HANDEDNESS_BIT != 0 {
        -1.0
    } else {
        1.0
    };
    (
        unpack_octahedral_u32(packed & !TANGENT_HANDEDNESS_BIT),
        handedness,
    )
}

// ============================================================================
// Full Vertex Packing
// ============================================================================

/// Append one POS_UV_NORMAL_TANGENT vertex (20 bytes) to `out`
///
/// Layout: Position → UV → Normal → Tangent
pub fn pack_vertex_tangent(
    out: &mut Vec<u8>,
    position: Vec3,
    uv: Vec2,
    normal: Vec3,
    tangent: Vec3,
    handedness: f32,
) {
    let pos = pack_position_f16(position);
    out.extend_from_slice(cast_slice(&pos)); // [f16; 4] → &[u8]

    let uv = pack_uv_unorm16(uv);
    out.extend_from_slice(cast_slice(&uv)); // [u16; 2] → &[u8]

    out.extend_from_slice(&pack_octahedral_u32(normal).to_le_bytes());
    out.extend_from_slice(&pack_tangent(tangent, handedness).to_le_bytes());
}
