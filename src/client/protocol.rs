use anyhow::{bail, Context, Result};
use prost::Message;
use std::io::{Read, Write};

/// Every message starts with two big-endian u32: the message type and the size of the body
pub const HEADER_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MessageType {
    Status = 0,
    Mol = 1,
    JobInput = 2,
    JobOutput = 3,
}

impl TryFrom<u32> for MessageType {
    type Error = anyhow::Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(MessageType::Status),
            1 => Ok(MessageType::Mol),
            2 => Ok(MessageType::JobInput),
            3 => Ok(MessageType::JobOutput),
            _ => bail!("unknown message type {}", value),
        }
    }
}

/// Write the header and the body of a message
pub fn write_frame<W: Write>(stream: &mut W, kind: MessageType, body: &[u8]) -> Result<()> {
    let size: u32 = u32::try_from(body.len()).context("message body too large")?;
    let mut header: [u8; HEADER_SIZE] = [0; HEADER_SIZE];
    header[..4].copy_from_slice(&(kind as u32).to_be_bytes());
    header[4..].copy_from_slice(&size.to_be_bytes());
    stream.write_all(&header)?;
    stream.write_all(body)?;
    stream.flush()?;
    Ok(())
}

/// Read the header and the body of the next message
pub fn read_frame<R: Read>(stream: &mut R) -> Result<(MessageType, Vec<u8>)> {
    let mut header: [u8; HEADER_SIZE] = [0; HEADER_SIZE];
    stream
        .read_exact(&mut header)
        .context("could not read the message header")?;
    let kind: MessageType = MessageType::try_from(u32::from_be_bytes([
        header[0], header[1], header[2], header[3],
    ]))?;
    let size = u32::from_be_bytes([header[4], header[5], header[6], header[7]]) as usize;
    let mut body: Vec<u8> = vec![0; size];
    stream
        .read_exact(&mut body)
        .with_context(|| format!("could not read the body of a {:?} message", kind))?;
    Ok((kind, body))
}

pub fn send_message<W: Write, M: Message>(
    stream: &mut W,
    kind: MessageType,
    message: &M,
) -> Result<()> {
    write_frame(stream, kind, &message.encode_to_vec())
}

/// Read the next message and decode it. Fails if the message type is not the expected one.
pub fn recv_message<R: Read, M: Message + Default>(
    stream: &mut R,
    expected: MessageType,
) -> Result<M> {
    let (kind, body) = read_frame(stream)?;
    if kind != expected {
        bail!("expected a {:?} message, but received {:?}", expected, kind);
    }
    M::decode(body.as_slice()).with_context(|| format!("could not decode the {:?} message", kind))
}
