use std::io::Write;

use serde::Serialize;
use serde_json;

use errors::*;

/// Formats one output pair as a line of the `key<TAB>value` protocol, without the newline.
///
/// Both sides are JSON encoded, so strings are quoted, unit keys become `null` and tuples
/// become arrays. This keeps lines unambiguous whatever the key contains.
pub fn format_pair<K, V>(key: &K, value: &V) -> Result<String>
where
    K: Serialize,
    V: Serialize,
{
    let key = serde_json::to_string(key).chain_err(|| "Error serialising output key.")?;
    let value = serde_json::to_string(value).chain_err(|| "Error serialising output value.")?;
    Ok(format!("{}\t{}", key, value))
}

/// `write_output` writes every pair to `sink`, one line per pair, in order.
pub fn write_output<W, K, V>(sink: &mut W, pairs: &[(K, V)]) -> Result<()>
where
    W: Write,
    K: Serialize,
    V: Serialize,
{
    for &(ref key, ref value) in pairs {
        let line = format_pair(key, value)?;
        writeln!(sink, "{}", line).chain_err(|| "Error writing output.")?;
    }
    sink.flush().chain_err(|| "Error flushing output.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_keys_and_counts() {
        let pairs = vec![("cat".to_owned(), 1u64), ("the".to_owned(), 2u64)];
        let mut sink: Vec<u8> = Vec::new();

        write_output(&mut sink, &pairs).unwrap();

        assert_eq!("\"cat\"\t1\n\"the\"\t2\n", String::from_utf8(sink).unwrap());
    }

    #[test]
    fn unit_key_is_null() {
        let line = format_pair(&(), &(2u64, "a")).unwrap();

        assert_eq!("null\t[2,\"a\"]", line);
    }

    #[test]
    fn tabs_inside_keys_are_escaped() {
        let line = format_pair(&"a\tb", &0.5f64).unwrap();

        assert_eq!("\"a\\tb\"\t0.5", line);
    }

    #[test]
    fn empty_output_writes_nothing() {
        let pairs: Vec<(String, u64)> = Vec::new();
        let mut sink: Vec<u8> = Vec::new();

        write_output(&mut sink, &pairs).unwrap();

        assert!(sink.is_empty());
    }
}
