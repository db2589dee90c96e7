

pub use ::std::io::{Read, Write, Seek, SeekFrom};
use lebe::prelude::*;
use crate::error::{Result, PassiveResult};


/// Extension trait for the little-endian primitives used by the trailer,
/// footer and id directory. The format has no byte-order ambiguity to hide
/// behind a generic `Data::read_slice`, so this is a much smaller relative
/// of the primitive (de)serialization trait other binary formats expose.
pub trait Data: Sized + Default + Clone {
    fn read(read: &mut impl Read) -> Result<Self>;
    fn write(self, write: &mut impl Write) -> PassiveResult;

    const BYTE_SIZE: usize = ::std::mem::size_of::<Self>();
}

macro_rules! implement_data_for_primitive {
    ($kind: ident) => {
        impl Data for $kind {
            fn read(read: &mut impl Read) -> Result<Self> {
                Ok(read.read_from_little_endian()?)
            }

            fn write(self, write: &mut impl Write) -> PassiveResult {
                write.write_as_little_endian(&self)?;
                Ok(())
            }
        }
    };
}

implement_data_for_primitive!(u8);
implement_data_for_primitive!(u16);
implement_data_for_primitive!(i32);
implement_data_for_primitive!(u64);


#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn primitives_round_trip(){
        let mut buffer = Vec::new();
        42_i32.write(&mut buffer).unwrap();
        9000_u16.write(&mut buffer).unwrap();
        u64::max_value().write(&mut buffer).unwrap();

        let mut cursor = Cursor::new(buffer);
        assert_eq!(i32::read(&mut cursor).unwrap(), 42);
        assert_eq!(u16::read(&mut cursor).unwrap(), 9000);
        assert_eq!(u64::read(&mut cursor).unwrap(), u64::max_value());
    }

}
