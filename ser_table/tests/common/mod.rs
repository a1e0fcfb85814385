mod minecraft_data;
pub use minecraft_data::generate_data as generate_minecraft_data;

pub enum Test {
	Primitives,
	Tuples,
	Structs,
	EnumFieldless,
	EnumWithFields,
	BoxedPrimitives,
	BoxedStructs,
	VecOfPrimitives,
	VecOfVecs,
	OptionalVecs,
	Strings,
	EmptyStrings,
	Options,
	MinecraftData,
}

/// Expected encoded size, where practical to calculate by hand
pub fn expected_size(test: Test, test_num: usize) -> Option<usize> {
	let size = match test {
		Test::Primitives => 79,
		Test::Tuples => 14,
		Test::Structs => 17,
		Test::EnumFieldless => 4,
		Test::EnumWithFields => [9, 9, 10, 7][test_num],
		Test::BoxedPrimitives => 79,
		Test::BoxedStructs => 10,
		Test::VecOfPrimitives => [12, 19, 37][test_num],
		Test::VecOfVecs => 48,
		Test::OptionalVecs => [4, 4, 8, 19][test_num],
		Test::Strings => [7, 5, 12, 18][test_num],
		Test::EmptyStrings => 4,
		Test::Options => [10, 15, 30, 28][test_num],
		Test::MinecraftData => return None,
	};
	Some(size)
}

macro_rules! tests {
	($test_round_trip:ident) => {
		#[test]
		fn primitives() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				u8: u8,
				u16: u16,
				u32: u32,
				u64: u64,
				u128: u128,
				i8: i8,
				i16: i16,
				i32: i32,
				i64: i64,
				i128: i128,
				f32: f32,
				f64: f64,
				bool: bool,
				char: char,
				unit: (),
			}

			let input = Foo {
				u8: 0x01,
				u16: 0x0203,
				u32: 0x04050607,
				u64: 0x08090a0b0c0d0e0f,
				u128: 0x101112131415161718191a1b1c1d1e1f,
				i8: 0x01,
				i16: 0x0203,
				i32: 0x04050607,
				i64: 0x08090a0b0c0d0e0f,
				i128: 0x101112131415161718191a1b1c1d1e1f,
				f32: f32::MAX,
				f64: f64::MAX / 2f64,
				bool: true,
				char: 'c',
				unit: (),
			};
			$test_round_trip(&input, Test::Primitives, 0);
		}

		#[test]
		fn tuples() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				tup: (u8, u16, u32),
				tup_of_boxes: (Box<u8>, Box<u16>, Box<u32>),
			}

			let input = Foo {
				tup: (0x01, 0x0203, 0x04050607),
				tup_of_boxes: (Box::new(0x08), Box::new(0x090a), Box::new(0x0b0c0d0e)),
			};
			$test_round_trip(&input, Test::Tuples, 0);
		}

		#[test]
		fn structs() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				unit: Unit,
				tuple: Tuple,
				generic: Wrapper<u16>,
			}

			#[derive(Serialize, Debug, PartialEq)]
			struct Unit;

			#[derive(Serialize, Debug, PartialEq)]
			struct Tuple(u8, String);

			#[derive(Serialize, Debug, PartialEq)]
			struct Wrapper<T> {
				inner: T,
				list: Vec<T>,
			}

			let input = Foo {
				unit: Unit,
				tuple: Tuple(0x01, "hi".to_string()),
				generic: Wrapper {
					inner: 0x0203,
					list: vec![0x0405, 0x0607],
				},
			};
			$test_round_trip(&input, Test::Structs, 0);
		}

		#[test]
		fn enum_fieldless() {
			#[derive(Serialize, Debug, PartialEq)]
			enum Foo {
				One,
				Two,
				Three,
			}

			$test_round_trip(&Foo::One, Test::EnumFieldless, 0);
			$test_round_trip(&Foo::Two, Test::EnumFieldless, 1);
			$test_round_trip(&Foo::Three, Test::EnumFieldless, 2);
		}

		#[test]
		fn enum_with_fields() {
			#[derive(Serialize, Debug, PartialEq)]
			enum Foo {
				Bar(Bar),
				Qux(Qux),
				// Field names which clash with names in derived code
				Named { writer: u8, engine: u16 },
			}

			#[derive(Serialize, Debug, PartialEq)]
			struct Bar {
				small: u8,
				big: u32,
			}

			#[derive(Serialize, Debug, PartialEq)]
			enum Qux {
				Small(i8),
				Big(i16),
			}

			$test_round_trip(
				&Foo::Bar(Bar {
					small: 0x01,
					big: 0x0203,
				}),
				Test::EnumWithFields,
				0,
			);
			$test_round_trip(&Foo::Qux(Qux::Small(0x04)), Test::EnumWithFields, 1);
			$test_round_trip(&Foo::Qux(Qux::Big(0x0506)), Test::EnumWithFields, 2);
			$test_round_trip(
				&Foo::Named {
					writer: 0x07,
					engine: 0x0809,
				},
				Test::EnumWithFields,
				3,
			);
		}

		#[test]
		fn boxed_primitives() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				u8: Box<u8>,
				u16: Box<u16>,
				u32: Box<u32>,
				u64: Box<u64>,
				u128: Box<u128>,
				i8: Box<i8>,
				i16: Box<i16>,
				i32: Box<i32>,
				i64: Box<i64>,
				i128: Box<i128>,
				f32: Box<f32>,
				f64: Box<f64>,
				bool: Box<bool>,
				char: Box<char>,
			}

			let input = Foo {
				u8: Box::new(0x01),
				u16: Box::new(0x0203),
				u32: Box::new(0x04050607),
				u64: Box::new(0x08090a0b0c0d0e0f),
				u128: Box::new(0x101112131415161718191a1b1c1d1e1f),
				i8: Box::new(0x01),
				i16: Box::new(0x0203),
				i32: Box::new(0x04050607),
				i64: Box::new(0x08090a0b0c0d0e0f),
				i128: Box::new(0x101112131415161718191a1b1c1d1e1f),
				f32: Box::new(f32::MAX),
				f64: Box::new(f64::MAX / 2f64),
				bool: Box::new(true),
				char: Box::new('c'),
			};
			$test_round_trip(&input, Test::BoxedPrimitives, 0);
		}

		#[test]
		fn boxed_structs() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				bar: Box<Bar>,
				bar2: Box<Bar>,
			}

			#[derive(Serialize, Debug, PartialEq)]
			struct Bar {
				small: u8,
				big: Box<u32>,
			}

			let input = Foo {
				bar: Box::new(Bar {
					small: 0x01,
					big: Box::new(0x02030405),
				}),
				bar2: Box::new(Bar {
					small: 0x01,
					big: Box::new(0x0708090a),
				}),
			};
			$test_round_trip(&input, Test::BoxedStructs, 0);
		}

		#[test]
		fn vec_of_primitives() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				small: Vec<u8>,
				middle: Vec<u16>,
				big: Vec<u32>,
			}

			$test_round_trip(
				&Foo {
					small: Vec::new(),
					middle: Vec::new(),
					big: Vec::new(),
				},
				Test::VecOfPrimitives,
				0,
			);

			$test_round_trip(
				&Foo {
					small: vec![0x01],
					middle: vec![0x0203],
					big: vec![0x04050607],
				},
				Test::VecOfPrimitives,
				1,
			);

			$test_round_trip(
				&Foo {
					small: vec![0x01, 0x02, 0x03],
					middle: vec![0x0405, 0x0607, 0x0809, 0x0a0b, 0x0c0d],
					big: vec![0x0e0f1012, 0x13141516, 0x1718191a],
				},
				Test::VecOfPrimitives,
				2,
			);
		}

		#[test]
		fn vec_of_vecs() {
			let input: Vec<Vec<u8>> = vec![
				vec![1, 2, 3],
				vec![4, 5, 6, 7, 8, 9],
				vec![10],
				vec![],
				vec![11, 12],
				vec![13, 14, 15, 16],
				vec![],
			];
			$test_round_trip(&input, Test::VecOfVecs, 0);
		}

		#[test]
		fn optional_vecs() {
			$test_round_trip(&None::<Vec<u32>>, Test::OptionalVecs, 0);
			$test_round_trip(&Some(Vec::<u32>::new()), Test::OptionalVecs, 1);
			$test_round_trip(&Some(vec![0x01020304u32]), Test::OptionalVecs, 2);

			let input: Option<Vec<Option<Vec<u8>>>> = Some(vec![
				None,
				Some(vec![]),
				Some(vec![1, 2, 3]),
			]);
			$test_round_trip(&input, Test::OptionalVecs, 3);
		}

		#[test]
		fn strings() {
			$test_round_trip(&"abc".to_string(), Test::Strings, 0);
			$test_round_trip(&"d".to_string(), Test::Strings, 1);
			$test_round_trip(&"efghijkl".to_string(), Test::Strings, 2);
			$test_round_trip(&"MNOPQRSTIVWXYZ".to_string(), Test::Strings, 3);
		}

		#[test]
		fn empty_strings() {
			$test_round_trip(&String::new(), Test::EmptyStrings, 0);
			$test_round_trip(&String::with_capacity(5), Test::EmptyStrings, 1);
		}

		#[test]
		fn options() {
			#[derive(Serialize, Debug, PartialEq)]
			struct Foo {
				bar: Option<Bar>,
				boxed: Option<Box<Bar>>,
				vec: Option<Vec<Bar>>,
				str: Option<String>,
			}

			#[derive(Serialize, Debug, PartialEq)]
			struct Bar {
				small: u8,
				big: u32,
			}

			$test_round_trip(
				&Foo {
					bar: None,
					boxed: None,
					vec: None,
					str: None,
				},
				Test::Options,
				0,
			);

			$test_round_trip(
				&Foo {
					bar: Some(Bar {
						small: 0x01,
						big: 0x0203,
					}),
					boxed: None,
					vec: None,
					str: Some("".to_string()),
				},
				Test::Options,
				1,
			);

			$test_round_trip(
				&Foo {
					bar: None,
					boxed: Some(Box::new(Bar {
						small: 0x04,
						big: 0x0506,
					})),
					vec: Some(vec![
						Bar {
							small: 0x07,
							big: 0x0809,
						},
						Bar {
							small: 0x0a,
							big: 0x0b0c,
						},
						Bar {
							small: 0x0d,
							big: 0x0e0f,
						},
					]),
					str: None,
				},
				Test::Options,
				2,
			);

			$test_round_trip(
				&Foo {
					bar: Some(Bar {
						small: 0x10,
						big: 0x1112,
					}),
					boxed: Some(Box::new(Bar {
						small: 0x13,
						big: 0x1415,
					})),
					vec: Some(vec![Bar {
						small: 0x16,
						big: 0x1718,
					}]),
					str: Some("def".to_string()),
				},
				Test::Options,
				3,
			);
		}

		#[test]
		fn minecraft_data() {
			let input = generate_minecraft_data();
			$test_round_trip(&input, Test::MinecraftData, 0);
		}
	};
}

pub(crate) use tests;
