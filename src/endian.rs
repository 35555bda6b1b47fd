// Copyright © 2024 Tobias J. Prisching <tobias.prisching@icloud.com> and CONTRIBUTORS
// See https://github.com/TechnikTobi/little_exif#license for licensing details

//! Byte-order aware conversion helpers. Trimmed down from the original
//! `little_exif` endian module (which also carried a `to_u8_vec` encoding
//! side, a dozen numeric widths and a `paste`-driven macro) to the handful
//! of integer widths this crate's dimension parsers actually read - there
//! is no tag-value *writing* path here.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum
Endian
{
	Big,
	Little
}

pub trait
U8conversion<T>
{
	fn
	from_u8_vec
	(
		u8_vec: &[u8],
		endian: &Endian
	)
	-> T;
}

macro_rules! build_u8conversion
{
	(
		$type:ty,
		$number_of_bytes:expr
	)
	=>
	{
		impl U8conversion<$type> for $type
		{
			fn
			from_u8_vec
			(
				u8_vec: &[u8],
				endian: &Endian
			)
			-> $type
			{
				assert!(u8_vec.len() == $number_of_bytes, "from_u8_vec: mangled header data encountered!");

				let bytes: [u8; $number_of_bytes] = u8_vec[0..$number_of_bytes].try_into().unwrap();

				match *endian
				{
					Endian::Little => <$type>::from_le_bytes(bytes),
					Endian::Big    => <$type>::from_be_bytes(bytes),
				}
			}
		}
	}
}

build_u8conversion![u16, 2];
build_u8conversion![i16, 2];
build_u8conversion![u32, 4];
build_u8conversion![i32, 4];

macro_rules! from_u8_vec_macro {
	($type:ty, $value:expr, $endian:expr)
	=>
	{
		<$type as crate::endian::U8conversion<$type>>::from_u8_vec($value, $endian)
	}
}

pub(crate) use from_u8_vec_macro;

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn
	u16_round_trip()
	{
		assert_eq!(from_u8_vec_macro!(u16, &[0x01, 0x02], &Endian::Little), 0x0201);
		assert_eq!(from_u8_vec_macro!(u16, &[0x01, 0x02], &Endian::Big), 0x0102);
	}

	#[test]
	fn
	i32_negative_little_endian()
	{
		let bytes = (-480i32).to_le_bytes();
		assert_eq!(from_u8_vec_macro!(i32, &bytes, &Endian::Little), -480);
	}
}
