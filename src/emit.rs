//! Rendering of the generated declarations and definitions artifacts.
//!
//! Everything here is pure string building over a [`CharsetDefinition`]:
//! the same definition and class name always produce identical bytes. The
//! emitted text is a C++ header/source pair for a class derived from
//! `Poco::TextEncoding`, and the table layout (tab indentation, 16 values
//! per row, field widths, lowercase hex) is compatibility-sensitive, so it
//! must not be "cleaned up".

use crate::charmap::CharsetDefinition;

const LICENSE: &str = concat!(
    "// Copyright (c) 2004-2007, Applied Informatics Software Engineering GmbH.\n",
    "// and Contributors.\n",
    "// \n",
    "// Permission is hereby granted, free of charge, to any person or organization\n",
    "// obtaining a copy of the software and accompanying documentation covered by\n",
    "// this license (the \"Software\") to use, reproduce, display, distribute,\n",
    "// execute, and transmit the Software, and to prepare derivative works of the\n",
    "// Software, and to permit third-parties to whom the Software is furnished to\n",
    "// do so, all subject to the following:\n",
    "// \n",
    "// The copyright notices in the Software and this entire statement, including\n",
    "// the above license grant, this restriction and the following disclaimer,\n",
    "// must be included in all copies of the Software, in whole or in part, and\n",
    "// all derivative works of the Software, unless such copies or derivative\n",
    "// works are solely in the form of machine-executable object code generated by\n",
    "// a source language processor.\n",
    "// \n",
    "// THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR\n",
    "// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,\n",
    "// FITNESS FOR A PARTICULAR PURPOSE, TITLE AND NON-INFRINGEMENT. IN NO EVENT\n",
    "// SHALL THE COPYRIGHT HOLDERS OR ANYONE DISTRIBUTING THE SOFTWARE BE LIABLE\n",
    "// FOR ANY DAMAGES OR OTHER LIABILITY, WHETHER IN CONTRACT, TORT OR OTHERWISE,\n",
    "// ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER\n",
    "// DEALINGS IN THE SOFTWARE.\n",
    "//\n",
    "// This file is generated automatically. Do not edit it.\n",
    "//\n\n\n",
);

/// Leading comment banner shared by both artifacts. The header variant
/// carries an extra "Definition of" line.
fn banner(class_name: &str, extension: &str, is_header: bool) -> String {
    let mut out = String::new();
    out.push_str("// \n");
    out.push_str(&format!("// {}.{}\n", class_name, extension));
    out.push_str("// \n");
    out.push_str("// $Id$\n");
    out.push_str("// \n");
    out.push_str("// Library: Foundation\n");
    out.push_str("// Package: Text\n");
    out.push_str(&format!("// Module:  {}\n", class_name));
    out.push_str("// \n");
    if is_header {
        out.push_str(&format!("// Definition of the {} class.\n", class_name));
        out.push_str("// \n");
    }
    out.push_str(LICENSE);
    out
}

/// Renders the declarations artifact: the generated class header.
///
/// Declares the names table, the forward character map, one reverse-bucket
/// array per non-empty bucket (named after `outer_index << 8` in 4-digit
/// hex), and the conversion operation signatures.
pub fn header(def: &CharsetDefinition, class_name: &str) -> String {
    let mut out = banner(class_name, "h", true);

    out.push_str("#pragma once\n\n\n");
    out.push_str("#include <string>\n");
    out.push_str("#include <Poco/Foundation.h>\n");
    out.push_str("#include <Poco/TextEncoding.h>\n\n\n");

    out.push_str("namespace Poco\n{\n");
    out.push_str(&format!(
        "\tclass Foundation_API {} : public Poco::TextEncoding\n",
        class_name
    ));
    out.push_str("\t{\n");
    out.push_str("\t\tstatic const char* _names[];\n");
    out.push_str("\t\tstatic const CharacterMap _map;\n");

    for outer in def.occupied_buckets() {
        out.push_str(&format!(
            "\t\tstatic const unsigned char _0x{:04x}_map[256];\n",
            outer << 8
        ));
    }

    out.push_str("\n\tpublic:\n");
    out.push_str(&format!("\t\t{}();\n", class_name));
    out.push_str(&format!("\t\t~{}();\n\n", class_name));
    out.push_str("\t\tconst char* canonicalName() const;\n");
    out.push_str("\t\tbool isA(const std::string& encodingName) const;\n");
    out.push_str("\t\tconst CharacterMap& characterMap() const;\n");
    out.push_str("\t\tint convert(const unsigned char* bytes) const;\n");
    out.push_str("\t\tint queryConvert(const unsigned char* bytes, int length) const;\n");
    out.push_str("\t\tint convert(int ch, unsigned char* bytes, int length) const;\n");
    out.push_str("\t};\n");
    out.push_str("}\n\n");

    out
}

/// Renders the definitions artifact: table data plus the bodies of the
/// declared operations.
pub fn source(def: &CharsetDefinition, class_name: &str) -> String {
    let mut out = banner(class_name, "cpp", false);

    out.push_str("#include <Poco/String.h>\n");
    out.push_str(&format!("#include <Poco/{}.h>\n\n\n", class_name));

    names_table(&mut out, def, class_name);
    forward_map(&mut out, def, class_name);
    reverse_maps(&mut out, def, class_name);

    out.push_str(&format!("Poco::{0}::{0}()\n{{}}\n\n\n", class_name));
    out.push_str(&format!("Poco::{0}::~{0}()\n{{}}\n\n\n", class_name));

    out.push_str(&format!(
        "const char* Poco::{}::canonicalName() const\n\
         {{\n\
         \treturn _names[0];\n\
         }}\n\n\n",
        class_name
    ));

    out.push_str(&format!(
        "bool Poco::{}::isA(const std::string& encodingName) const\n\
         {{\n\
         \tfor (const char** name = _names; *name; ++name)\n\
         \t{{\n\
         \t\tif (Poco::icompare (encodingName, *name) == 0)\n\
         \t\t\treturn true;\n\
         \t}}\n\n\
         \treturn false;\n\
         }}\n\n\n",
        class_name
    ));

    out.push_str(&format!(
        "const Poco::TextEncoding::CharacterMap& Poco::{}::characterMap() const\n\
         {{\n\
         \treturn _map;\n\
         }}\n\n\n",
        class_name
    ));

    out.push_str(&format!(
        "int Poco::{}::convert(const unsigned char* bytes) const\n\
         {{\n\
         \treturn _map[*bytes];\n\
         }}\n\n\n",
        class_name
    ));

    out.push_str(&format!(
        "int Poco::{}::queryConvert(const unsigned char* bytes, int length) const\n\
         {{\n\
         \treturn _map[*bytes];\n\
         }}\n\n\n",
        class_name
    ));

    convert_routine(&mut out, def, class_name);

    out
}

fn names_table(out: &mut String, def: &CharsetDefinition, class_name: &str) {
    out.push_str(&format!(
        "const char* Poco::{}::_names[] =\n{{\n",
        class_name
    ));
    for name in def.names() {
        out.push_str(&format!("\t\"{}\",\n", name));
    }
    out.push_str("\tNULL\n};\n\n\n");
}

/// Forward map: 256 entries, 16 per tab-indented row. Mapped slots render
/// as 4-digit hex, unmapped ones as `-1` in a 6-wide decimal field.
fn forward_map(out: &mut String, def: &CharsetDefinition, class_name: &str) {
    out.push_str(&format!(
        "const Poco::TextEncoding::CharacterMap Poco::{}::_map =\n{{\n",
        class_name
    ));
    for code in 0..256 {
        if code % 16 == 0 {
            out.push('\t');
        }
        match def.codepoint(code as u8) {
            Some(u) => out.push_str(&format!("0x{:04x}, ", u)),
            None => out.push_str(&format!("{:6}, ", -1)),
        }
        if code % 16 == 15 {
            out.push('\n');
        }
    }
    out.push_str("};\n\n\n");
}

/// Reverse maps: one 256-entry `unsigned char` array per non-empty bucket.
/// Empty buckets produce nothing at all.
fn reverse_maps(out: &mut String, def: &CharsetDefinition, class_name: &str) {
    for outer in def.occupied_buckets() {
        out.push_str(&format!(
            "const unsigned char Poco::{}::_0x{:04x}_map[256] =\n{{\n",
            class_name,
            outer << 8
        ));
        let bucket = def.bucket(outer);
        for (inner, &slot) in bucket.iter().enumerate() {
            if inner % 16 == 0 {
                out.push('\t');
            }
            if slot > 0 {
                out.push_str(&format!("0x{:02x}, ", slot));
            } else {
                out.push_str(&format!("{:4}, ", 0));
            }
            if inner % 16 == 15 {
                out.push('\n');
            }
        }
        out.push_str("};\n\n\n");
    }
}

/// The codepoint-to-byte conversion body: a NUL fast path, then an
/// `else if` chain dispatching on the codepoint high byte to the matching
/// reverse bucket. Buckets absent from the declarations are absent here
/// too, and fall through to the trailing `return 0`.
fn convert_routine(out: &mut String, def: &CharsetDefinition, class_name: &str) {
    out.push_str(&format!(
        "int Poco::{}::convert(int ch, unsigned char* bytes, int length) const\n{{\n",
        class_name
    ));

    out.push_str(
        "\tif (ch == 0x0000)\n\
         \t{\n\
         \t\tif (bytes && (length >= 1))\n\
         \t\t\t*bytes = 0x00;\n\
         \t\treturn 1;\n\
         \t}\n\n\
         \telse",
    );

    for outer in def.occupied_buckets() {
        let prefix = outer << 8;
        out.push_str(&format!(
            " if ((ch & 0xff00) == 0x{0:04x})\n\
             \t{{\n\
             \t\tif ((unsigned char)_0x{0:04x}_map[ch & 0x00ff] > 0)\n\
             \t\t{{\n\
             \t\t\tif (bytes && (length >= 1))\n\
             \t\t\t\t*bytes = (unsigned char)_0x{0:04x}_map[ch & 0x00ff];\n\
             \t\t\treturn 1;\n\
             \t\t}}\n\
             \t\treturn 0;\n\
             \t}}\n\n\
             \telse",
            prefix
        ));
    }

    out.push_str("\n\t\treturn 0;\n}\n");
}
