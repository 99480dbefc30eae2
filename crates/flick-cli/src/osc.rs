//! Just enough OSC 1.0 to pull sensor floats out of UDP packets.
//!
//! Messages carry an address, a `,`-prefixed type tag string and big-endian
//! arguments, each padded to four bytes. Bundles are flattened; their time
//! tags are ignored.

use std::fmt;

use flick_core::{Quaternion, Reading, Vec3};

const BUNDLE_TAG: &[u8] = b"#bundle\0";

#[derive(Debug, Clone, PartialEq)]
pub enum OscError {
    Truncated,
    BadString,
    MissingTypeTags,
    UnsupportedType(char),
    ArgumentCount(usize),
}

impl fmt::Display for OscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscError::Truncated => write!(f, "packet ends early"),
            OscError::BadString => write!(f, "unterminated or non-UTF-8 string"),
            OscError::MissingTypeTags => write!(f, "no type tag string"),
            OscError::UnsupportedType(t) => write!(f, "unsupported argument type '{t}'"),
            OscError::ArgumentCount(n) => {
                write!(f, "expected 3 or 10 numeric arguments, got {n}")
            }
        }
    }
}

impl std::error::Error for OscError {}

#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    pub address: String,
    pub args: Vec<f64>,
}

/// Decode a packet into its messages, flattening bundles.
pub fn decode_packet(buf: &[u8]) -> Result<Vec<OscMessage>, OscError> {
    let mut out = Vec::new();
    decode_into(buf, &mut out)?;
    Ok(out)
}

fn decode_into(buf: &[u8], out: &mut Vec<OscMessage>) -> Result<(), OscError> {
    if buf.starts_with(BUNDLE_TAG) {
        // Tag plus 8-byte time tag.
        let mut pos = BUNDLE_TAG.len() + 8;
        if buf.len() < pos {
            return Err(OscError::Truncated);
        }
        while pos < buf.len() {
            let size = read_i32(buf, &mut pos)?;
            let size = usize::try_from(size).map_err(|_| OscError::Truncated)?;
            let end = pos.checked_add(size).ok_or(OscError::Truncated)?;
            let element = buf.get(pos..end).ok_or(OscError::Truncated)?;
            decode_into(element, out)?;
            pos = end;
        }
        return Ok(());
    }
    out.push(decode_message(buf)?);
    Ok(())
}

fn decode_message(buf: &[u8]) -> Result<OscMessage, OscError> {
    let mut pos = 0;
    let address = read_string(buf, &mut pos)?;
    if pos >= buf.len() {
        return Ok(OscMessage {
            address,
            args: Vec::new(),
        });
    }
    let tags = read_string(buf, &mut pos)?;
    let tags = tags.strip_prefix(',').ok_or(OscError::MissingTypeTags)?;

    let mut args = Vec::with_capacity(tags.len());
    for tag in tags.chars() {
        let value = match tag {
            'f' => f32::from_bits(read_u32(buf, &mut pos)?) as f64,
            'd' => {
                let hi = read_u32(buf, &mut pos)? as u64;
                let lo = read_u32(buf, &mut pos)? as u64;
                f64::from_bits((hi << 32) | lo)
            }
            'i' => read_i32(buf, &mut pos)? as f64,
            other => return Err(OscError::UnsupportedType(other)),
        };
        args.push(value);
    }
    Ok(OscMessage { address, args })
}

fn read_string(buf: &[u8], pos: &mut usize) -> Result<String, OscError> {
    let rest = buf.get(*pos..).ok_or(OscError::Truncated)?;
    let len = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or(OscError::BadString)?;
    let s = std::str::from_utf8(&rest[..len]).map_err(|_| OscError::BadString)?;
    // Terminator included, padded to a multiple of four.
    *pos += (len + 4) & !3;
    Ok(s.to_string())
}

fn read_u32(buf: &[u8], pos: &mut usize) -> Result<u32, OscError> {
    let bytes = buf.get(*pos..*pos + 4).ok_or(OscError::Truncated)?;
    *pos += 4;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_i32(buf: &[u8], pos: &mut usize) -> Result<i32, OscError> {
    read_u32(buf, pos).map(|v| v as i32)
}

/// Interpret message arguments as a sensor reading: three floats are raw
/// acceleration; ten are user acceleration, gravity and attitude `w,x,y,z`.
pub fn reading_from_args(args: &[f64]) -> Result<Reading, OscError> {
    match *args {
        [x, y, z] => Ok(Reading::Raw {
            accel: Vec3::new(x, y, z),
        }),
        [ux, uy, uz, gx, gy, gz, qw, qx, qy, qz] => Ok(Reading::Fused {
            user_accel: Vec3::new(ux, uy, uz),
            gravity: Vec3::new(gx, gy, gz),
            attitude: Quaternion::new(qw, qx, qy, qz),
        }),
        _ => Err(OscError::ArgumentCount(args.len())),
    }
}

#[cfg(test)]
pub(crate) fn encode_message(address: &str, args: &[f32]) -> Vec<u8> {
    fn push_str(out: &mut Vec<u8>, s: &str) {
        out.extend_from_slice(s.as_bytes());
        let pad = 4 - s.len() % 4;
        out.extend(std::iter::repeat_n(0u8, pad));
    }
    let mut out = Vec::new();
    push_str(&mut out, address);
    push_str(&mut out, &format!(",{}", "f".repeat(args.len())));
    for a in args {
        out.extend_from_slice(&a.to_be_bytes());
    }
    out
}
