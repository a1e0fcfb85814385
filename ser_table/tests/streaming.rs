use std::{
	fmt::Debug,
	io::{BufReader, BufWriter, Cursor, Read},
};

mod common;
use common::{expected_size, generate_minecraft_data, tests, Test};
use ser_table::{Engine, Limits, Serialize};

// Every value in the shared tests fits comfortably within these
const LIMITS: Limits = Limits::with_all(1_000);

fn test_round_trip<T>(input: &T, test: Test, test_num: usize)
where T: Serialize + Debug + PartialEq {
	let engine = Engine::for_root::<T>().unwrap();

	let mut writer = BufWriter::new(Vec::new());
	engine.serialize_with(&mut writer, input, &LIMITS).unwrap();
	let mut bytes = writer.into_inner().unwrap();
	// Trailing bytes belong to the next message
	bytes.extend_from_slice(&[0xff, 0xee]);

	if let Some(expected) = expected_size(test, test_num) {
		assert_eq!(bytes.len(), expected + 2);
	}

	let mut reader = BufReader::new(Cursor::new(bytes));
	let output = engine.deserialize_with::<T, _>(&mut reader, &LIMITS).unwrap();
	assert_eq!(&output, input);

	let mut rest = vec![];
	reader.read_to_end(&mut rest).unwrap();
	assert_eq!(rest, [0xff, 0xee]);
}

tests!(test_round_trip);
