//! Typed records for the counseling platform and the interfaces through which
//! they are read and written.
//!
//! Rows arrive from the remote table store as untyped JSON objects; they are
//! validated into the structs in [`records`] at the boundary by
//! [`store::decode_rows`], so the panel logic never touches raw rows.

pub mod error;
pub mod notes;
pub mod records;
pub mod store;

pub use error::ModelError;
pub use notes::{decode_notes, encode_notes, ClientNotes, MemoryNoteStore, NoteStore, NoteStoreError, NOTES_KEY};
pub use records::{
    Booking, BookingStatus, Counselor, Payment, PaymentStatus, Schedule, ServiceType, User,
};
pub use store::{
    decode_rows, decode_single, encode_row, filters_to_query_string, rows_from_body, Direction, Embed, Filter,
    MemoryTableStore, Order, Query, Row, StoreError, Table, TableStore,
};
