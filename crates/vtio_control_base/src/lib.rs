mod bytevec;
mod esc;

pub use crate::esc::{
    EscapeSequenceIntermediates, EscapeSequenceIntroducer, EscapeSequenceParam,
    EscapeSequenceParams, EscapeSequence,
};

pub use vtenc::{
    ConstEncode, ConstEncodedLen, Encode, EncodeError, IntoSeq, WriteSeq, const_composite,
    write_apc, write_bytes_into, write_csi, write_dcs, write_esc, write_escst, write_int,
    write_str_into,
};
