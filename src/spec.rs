//! KODA Format Specification
//!
//! This module documents the two coupled KODA surfaces as implemented by
//! this library: the human-editable text syntax (`.koda`) and the canonical
//! binary encoding (`.kod`).
//!
//! # Overview
//!
//! KODA is a compact data-interchange format. Both surfaces describe the
//! same value model; the text form optimizes for hand editing, the binary
//! form for byte-level determinism: structurally equal values always encode
//! to identical bytes, so encoded blobs can serve as content-addressed
//! artifacts, cache keys, or database blobs.
//!
//! # Value model
//!
//! | Type | Text | Binary tag |
//! |------|------|------------|
//! | Null | `null` | `0x01` |
//! | Bool | `true` / `false` | `0x03` / `0x02` |
//! | Int | decimal digits, optional `-` | `0x04` (int64, big-endian) |
//! | Float | decimal with `.` or exponent | `0x05` (binary64 bits, big-endian) |
//! | String | bare identifier or quoted | `0x06` (u32 length + UTF-8 bytes) |
//! | Array | `[...]` | `0x10` (u32 count + elements) |
//! | Object | `{...}` or implicit root | `0x11` (u32 count + indexed entries) |
//!
//! Tag `0x07` is reserved for byte strings in a future version; this
//! decoder rejects it.
//!
//! # Text syntax
//!
//! ## Documents
//!
//! A document is either a single value or an implicit brace-less object: if
//! the first token is a key (identifier or string) and more tokens follow,
//! the document is a sequence of key-value pairs.
//!
//! ```text
//! name: "my-app"
//! version: 1
//! enabled: true
//! ```
//!
//! ## Separators
//!
//! The colon between a key and its value and the comma between entries are
//! both optional; whitespace alone separates. `{a 1 b 2}` and `{a: 1, b: 2}`
//! parse identically. Because of this, any legal input that also happens to
//! be JSON parses to the structurally equivalent value.
//!
//! ## Strings and identifiers
//!
//! Strings take single or double quotes with the escapes `\"`/`\'` (the
//! active quote), `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t`, and `\uXXXX`.
//! Raw control characters below U+0020 are rejected. A bare identifier
//! (`[A-Za-z_][A-Za-z0-9_-]*`, not `true`/`false`/`null`) in value position
//! is a plain string: `name: my-app` equals `name: "my-app"`.
//!
//! ## Numbers
//!
//! Numbers begin with an optional `-` and a digit; `.5` is invalid, and a
//! leading zero may not be followed by another digit. A fractional part
//! (`.` plus digits) or an exponent (`e`/`E`, optional sign, digits) makes
//! the number a float; otherwise it is a 64-bit integer.
//!
//! ## Comments
//!
//! `// line comments` run to end-of-line. `/* block comments */` nest and
//! must be closed.
//!
//! # Binary layout
//!
//! ```text
//! magic     "KODA" (4B 4F 44 41)
//! version   0x01
//! dict_len  u32 big-endian
//! dict[i]   u32 key length + key bytes, for each of dict_len keys
//! root      tagged value
//! ```
//!
//! The dictionary is the deduplicated set of every object key appearing
//! anywhere in the tree, sorted by UTF-8 byte comparison. Objects reference
//! keys by u32 index and emit their entries in the same sorted order, which
//! is what makes the encoding canonical. Exactly zero bytes may follow the
//! root value.
//!
//! # Limits
//!
//! All operations bound adversarial input: nesting depth (default 256),
//! text input length (default 1 000 000 bytes), dictionary size (default
//! 65 536 entries), and string length (default 1 000 000 bytes). Each
//! overflow raises a distinct named error before any allocation
//! proportional to the declared size.
