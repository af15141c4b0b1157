//
//  confluence-client
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON output helpers.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use crate::api::common::CollectedPages;

/// Writes `value` to stdout followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value, pretty)
}

/// Writes `value` to any writer followed by a newline.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Printed shape of a paginated `cfl call --paginate`.
#[derive(Debug, Serialize)]
pub struct CollectedOutput {
    pub results: Vec<Value>,
    pub pages: usize,
    pub truncated: bool,
}

impl From<CollectedPages> for CollectedOutput {
    fn from(collected: CollectedPages) -> Self {
        Self {
            results: collected.results,
            pages: collected.pages,
            truncated: collected.truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_compact() {
        let mut out = Vec::new();
        write_json_to(&mut out, &json!({"id": "1"}), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"id\":\"1\"}\n");
    }

    #[test]
    fn test_write_pretty() {
        let mut out = Vec::new();
        write_json_to(&mut out, &json!({"id": "1"}), true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"id\": \"1\"\n}\n");
    }

    #[test]
    fn test_collected_output_shape() {
        let collected = CollectedPages {
            results: vec![json!({"id": "1"})],
            pages: 2,
            truncated: false,
            ..Default::default()
        };
        let value = serde_json::to_value(CollectedOutput::from(collected)).unwrap();
        assert_eq!(
            value,
            json!({"results": [{"id": "1"}], "pages": 2, "truncated": false})
        );
    }
}
