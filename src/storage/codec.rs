//! Fixed-width binary record layouts
//!
//! Store files are headerless runs of equal-sized records. Integers and
//! floats are little-endian, fields sit at their C natural-alignment offsets
//! and padding bytes are written as zero.
//!
//! Client, 200 bytes:
//!
//! | offset | size | field       |
//! |--------|------|-------------|
//! | 0      | 4    | id (i32)    |
//! | 4      | 50   | name        |
//! | 54     | 100  | address     |
//! | 154    | 20   | phone       |
//! | 174    | 2    | padding     |
//! | 176    | 8    | consumption |
//! | 184    | 8    | rate        |
//! | 192    | 8    | last_bill   |
//!
//! Bill, 56 bytes:
//!
//! | offset | size | field            |
//! |--------|------|------------------|
//! | 0      | 4    | id (i32)         |
//! | 4      | 4    | client_id (i32)  |
//! | 8      | 8    | consumption      |
//! | 16     | 8    | rate             |
//! | 24     | 8    | amount           |
//! | 32     | 16   | due_date         |
//! | 48     | 4    | paid (i32, 0/1)  |
//! | 52     | 4    | padding          |

use thiserror::Error;

use crate::models::{
    Bill, BillId, Client, ClientAddress, ClientId, ClientName, ClientPhone, DueDate, TextError,
};

/// Why a record buffer could not be decoded
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("record buffer is {actual} bytes, expected {expected}")]
    Length { expected: usize, actual: usize },

    #[error("field `{field}`: {source}")]
    Text {
        field: &'static str,
        #[source]
        source: TextError,
    },
}

/// A record type with a single fixed-width binary encoding
pub trait FixedRecord: Sized {
    /// Exact encoded size in bytes
    const RECORD_SIZE: usize;

    /// Lowercase name used in log and error messages
    const KIND: &'static str;

    /// Write this record into `buf`, which is `RECORD_SIZE` zeroed bytes
    fn encode_into(&self, buf: &mut [u8]);

    /// Read a record from exactly `RECORD_SIZE` bytes
    fn decode(buf: &[u8]) -> Result<Self, CodecError>;

    /// Encode into a fresh buffer
    fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::RECORD_SIZE];
        self.encode_into(&mut buf);
        buf
    }
}

/// Encode a run of records back to back
pub fn encode_all<T: FixedRecord>(records: &[T]) -> Vec<u8> {
    let mut image = vec![0u8; records.len() * T::RECORD_SIZE];
    for (record, slot) in records.iter().zip(image.chunks_exact_mut(T::RECORD_SIZE)) {
        record.encode_into(slot);
    }
    image
}

mod client_layout {
    pub const ID: usize = 0;
    pub const NAME: usize = 4;
    pub const ADDRESS: usize = 54;
    pub const PHONE: usize = 154;
    pub const CONSUMPTION: usize = 176;
    pub const RATE: usize = 184;
    pub const LAST_BILL: usize = 192;
    pub const SIZE: usize = 200;
}

mod bill_layout {
    pub const ID: usize = 0;
    pub const CLIENT_ID: usize = 4;
    pub const CONSUMPTION: usize = 8;
    pub const RATE: usize = 16;
    pub const AMOUNT: usize = 24;
    pub const DUE_DATE: usize = 32;
    pub const PAID: usize = 48;
    pub const SIZE: usize = 56;
}

fn put_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_f64(buf: &mut [u8], offset: usize, value: f64) {
    buf[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

fn put_bytes(buf: &mut [u8], offset: usize, field: &[u8]) {
    buf[offset..offset + field.len()].copy_from_slice(field);
}

fn get_i32(buf: &[u8], offset: usize) -> i32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buf[offset..offset + 4]);
    i32::from_le_bytes(raw)
}

fn get_f64(buf: &[u8], offset: usize) -> f64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&buf[offset..offset + 8]);
    f64::from_le_bytes(raw)
}

fn check_len(buf: &[u8], expected: usize) -> Result<(), CodecError> {
    if buf.len() != expected {
        return Err(CodecError::Length {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

fn text_err(field: &'static str) -> impl FnOnce(TextError) -> CodecError {
    move |source| CodecError::Text { field, source }
}

impl FixedRecord for Client {
    const RECORD_SIZE: usize = client_layout::SIZE;
    const KIND: &'static str = "client";

    fn encode_into(&self, buf: &mut [u8]) {
        use client_layout::*;
        put_i32(buf, ID, self.id.get());
        put_bytes(buf, NAME, &self.name.to_field());
        put_bytes(buf, ADDRESS, &self.address.to_field());
        put_bytes(buf, PHONE, &self.phone.to_field());
        put_f64(buf, CONSUMPTION, self.consumption);
        put_f64(buf, RATE, self.rate);
        put_f64(buf, LAST_BILL, self.last_bill);
    }

    fn decode(buf: &[u8]) -> Result<Self, CodecError> {
        use client_layout::*;
        check_len(buf, SIZE)?;
        Ok(Client {
            id: ClientId::new(get_i32(buf, ID)),
            name: ClientName::from_field(&buf[NAME..ADDRESS]).map_err(text_err("name"))?,
            address: ClientAddress::from_field(&buf[ADDRESS..PHONE])
                .map_err(text_err("address"))?,
            phone: ClientPhone::from_field(&buf[PHONE..PHONE + 20]).map_err(text_err("phone"))?,
            consumption: get_f64(buf, CONSUMPTION),
            rate: get_f64(buf, RATE),
            last_bill: get_f64(buf, LAST_BILL),
        })
    }
}

impl FixedRecord for Bill {
    const RECORD_SIZE: usize = bill_layout::SIZE;
    const KIND: &'static str = "bill";

    fn encode_into(&self, buf: &mut [u8]) {
        use bill_layout::*;
        put_i32(buf, ID, self.id.get());
        put_i32(buf, CLIENT_ID, self.client_id.get());
        put_f64(buf, CONSUMPTION, self.consumption);
        put_f64(buf, RATE, self.rate);
        put_f64(buf, AMOUNT, self.amount);
        put_bytes(buf, DUE_DATE, &self.due_date.to_field());
        put_i32(buf, PAID, i32::from(self.paid));
    }

    fn decode(buf: &[u8]) -> Result<Self, CodecError> {
        use bill_layout::*;
        check_len(buf, SIZE)?;
        Ok(Bill {
            id: BillId::new(get_i32(buf, ID)),
            client_id: ClientId::new(get_i32(buf, CLIENT_ID)),
            consumption: get_f64(buf, CONSUMPTION),
            rate: get_f64(buf, RATE),
            amount: get_f64(buf, AMOUNT),
            due_date: DueDate::from_field(&buf[DUE_DATE..PAID]).map_err(text_err("due_date"))?,
            paid: get_i32(buf, PAID) != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client() -> Client {
        Client::new(
            ClientId::new(7),
            ClientName::new("Grace Hopper").unwrap(),
            ClientAddress::new("1 Navy Yard").unwrap(),
            ClientPhone::new("555-0199").unwrap(),
            321.5,
            0.21,
            67.515,
        )
    }

    #[test]
    fn test_client_offsets() {
        let bytes = sample_client().encode();
        assert_eq!(bytes.len(), 200);
        assert_eq!(&bytes[0..4], &7i32.to_le_bytes());
        assert_eq!(&bytes[4..16], b"Grace Hopper");
        assert_eq!(bytes[16], 0);
        assert_eq!(&bytes[54..65], b"1 Navy Yard");
        assert_eq!(&bytes[154..162], b"555-0199");
        assert_eq!(&bytes[174..176], &[0, 0]);
        assert_eq!(&bytes[176..184], &321.5f64.to_le_bytes());
        assert_eq!(&bytes[192..200], &67.515f64.to_le_bytes());
    }

    #[test]
    fn test_bill_offsets() {
        let mut bill = Bill::new(
            BillId::new(3),
            ClientId::new(7),
            100.0,
            0.2,
            DueDate::new("2024-02-01").unwrap(),
        );
        bill.mark_paid();
        let bytes = bill.encode();
        assert_eq!(bytes.len(), 56);
        assert_eq!(&bytes[4..8], &7i32.to_le_bytes());
        assert_eq!(&bytes[24..32], &bill.amount.to_le_bytes());
        assert_eq!(&bytes[32..42], b"2024-02-01");
        assert_eq!(&bytes[48..52], &1i32.to_le_bytes());
        assert_eq!(&bytes[52..56], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_matches_encode() {
        let client = sample_client();
        let decoded = Client::decode(&client.encode()).unwrap();
        assert_eq!(decoded, client);
    }

    #[test]
    fn test_nonzero_paid_is_true() {
        let bill = Bill::new(
            BillId::new(1),
            ClientId::new(1),
            1.0,
            1.0,
            DueDate::new("2024-02-01").unwrap(),
        );
        let mut bytes = bill.encode();
        bytes[48..52].copy_from_slice(&5i32.to_le_bytes());
        assert!(Bill::decode(&bytes).unwrap().paid);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let err = Bill::decode(&[0u8; 55]).unwrap_err();
        assert!(matches!(err, CodecError::Length { expected: 56, actual: 55 }));
    }

    #[test]
    fn test_unterminated_name_rejected() {
        let mut bytes = sample_client().encode();
        for b in &mut bytes[4..54] {
            *b = b'x';
        }
        let err = Client::decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::Text { field: "name", .. }));
    }

    #[test]
    fn test_encode_all_concatenates() {
        let a = sample_client();
        let mut b = sample_client();
        b.id = ClientId::new(8);
        let image = encode_all(&[a.clone(), b]);
        assert_eq!(image.len(), 400);
        assert_eq!(&image[..200], a.encode().as_slice());
        assert_eq!(&image[200..204], &8i32.to_le_bytes());
    }
}
