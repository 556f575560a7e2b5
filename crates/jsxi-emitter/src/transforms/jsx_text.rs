//! JSX text normalization.
//!
//! JSX text children are folded the way browsers never see them: lines are
//! trimmed, blank lines dropped and the rest joined by single spaces. The
//! first line keeps its leading whitespace and the last line keeps its
//! trailing whitespace, so `<a> x </a>` still renders `" x "`. HTML entities
//! (`&amp;`, `&#169;`, `&#x2014;`) are decoded; unknown ones stay as written.

use std::borrow::Cow;

/// Normalize a JSX text child. `None` when nothing survives.
pub fn fixup_whitespace_and_decode_entities(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut acc: Option<String> = None;
    let mut line_start = 0usize;
    let mut first_line = true;

    for brk in memchr::memchr2_iter(b'\n', b'\r', bytes) {
        let line = &text[line_start..brk];
        let trimmed = if first_line {
            line.trim_end_matches(is_single_line_whitespace)
        } else {
            line.trim_matches(is_single_line_whitespace)
        };
        // A first line of only whitespace contributes nothing.
        if !trimmed.trim_start_matches(is_single_line_whitespace).is_empty() {
            add_line(&mut acc, trimmed);
        }
        line_start = brk + 1;
        first_line = false;
    }

    let last = &text[line_start..];
    if first_line {
        add_line(&mut acc, last);
    } else {
        let trimmed = last.trim_start_matches(is_single_line_whitespace);
        if !trimmed.is_empty() {
            add_line(&mut acc, trimmed);
        }
    }
    acc
}

fn add_line(acc: &mut Option<String>, line: &str) {
    let decoded = decode_entities(line);
    match acc {
        Some(text) => {
            text.push(' ');
            text.push_str(&decoded);
        }
        None => *acc = Some(decoded.into_owned()),
    }
}

fn is_single_line_whitespace(c: char) -> bool {
    c != '\n' && c != '\r' && c.is_whitespace()
}

/// Replace `&name;`, `&#123;` and `&#x7B;` references with their characters.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if memchr::memchr(b'&', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = memchr::memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match parse_entity(candidate) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &candidate[len..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Parse an entity at the start of `s` (which begins with `&`); returns the
/// character and the byte length of the reference including `;`.
fn parse_entity(s: &str) -> Option<(char, usize)> {
    let body = &s[1..];
    let semi = body.find(';')?;
    let name = &body[..semi];
    let code = if let Some(hex) = name.strip_prefix("#x") {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(decimal) = name.strip_prefix('#') {
        if decimal.is_empty() || !decimal.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        decimal.parse::<u32>().ok()?
    } else {
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return None;
        }
        named_entity(name)?
    };
    let ch = char::from_u32(code)?;
    Some((ch, semi + 2))
}

/// HTML 4 named character references.
fn named_entity(name: &str) -> Option<u32> {
    let code = match name {
        "quot" => 34,
        "amp" => 38,
        "apos" => 39,
        "lt" => 60,
        "gt" => 62,
        "nbsp" => 160,
        "iexcl" => 161,
        "cent" => 162,
        "pound" => 163,
        "curren" => 164,
        "yen" => 165,
        "brvbar" => 166,
        "sect" => 167,
        "uml" => 168,
        "copy" => 169,
        "ordf" => 170,
        "laquo" => 171,
        "not" => 172,
        "shy" => 173,
        "reg" => 174,
        "macr" => 175,
        "deg" => 176,
        "plusmn" => 177,
        "sup2" => 178,
        "sup3" => 179,
        "acute" => 180,
        "micro" => 181,
        "para" => 182,
        "middot" => 183,
        "cedil" => 184,
        "sup1" => 185,
        "ordm" => 186,
        "raquo" => 187,
        "frac14" => 188,
        "frac12" => 189,
        "frac34" => 190,
        "iquest" => 191,
        "Agrave" => 192,
        "Aacute" => 193,
        "Acirc" => 194,
        "Atilde" => 195,
        "Auml" => 196,
        "Aring" => 197,
        "AElig" => 198,
        "Ccedil" => 199,
        "Egrave" => 200,
        "Eacute" => 201,
        "Ecirc" => 202,
        "Euml" => 203,
        "Igrave" => 204,
        "Iacute" => 205,
        "Icirc" => 206,
        "Iuml" => 207,
        "ETH" => 208,
        "Ntilde" => 209,
        "Ograve" => 210,
        "Oacute" => 211,
        "Ocirc" => 212,
        "Otilde" => 213,
        "Ouml" => 214,
        "times" => 215,
        "Oslash" => 216,
        "Ugrave" => 217,
        "Uacute" => 218,
        "Ucirc" => 219,
        "Uuml" => 220,
        "Yacute" => 221,
        "THORN" => 222,
        "szlig" => 223,
        "agrave" => 224,
        "aacute" => 225,
        "acirc" => 226,
        "atilde" => 227,
        "auml" => 228,
        "aring" => 229,
        "aelig" => 230,
        "ccedil" => 231,
        "egrave" => 232,
        "eacute" => 233,
        "ecirc" => 234,
        "euml" => 235,
        "igrave" => 236,
        "iacute" => 237,
        "icirc" => 238,
        "iuml" => 239,
        "eth" => 240,
        "ntilde" => 241,
        "ograve" => 242,
        "oacute" => 243,
        "ocirc" => 244,
        "otilde" => 245,
        "ouml" => 246,
        "divide" => 247,
        "oslash" => 248,
        "ugrave" => 249,
        "uacute" => 250,
        "ucirc" => 251,
        "uuml" => 252,
        "yacute" => 253,
        "thorn" => 254,
        "yuml" => 255,
        "OElig" => 338,
        "oelig" => 339,
        "Scaron" => 352,
        "scaron" => 353,
        "Yuml" => 376,
        "fnof" => 402,
        "circ" => 710,
        "tilde" => 732,
        "Alpha" => 913,
        "Beta" => 914,
        "Gamma" => 915,
        "Delta" => 916,
        "Epsilon" => 917,
        "Zeta" => 918,
        "Eta" => 919,
        "Theta" => 920,
        "Iota" => 921,
        "Kappa" => 922,
        "Lambda" => 923,
        "Mu" => 924,
        "Nu" => 925,
        "Xi" => 926,
        "Omicron" => 927,
        "Pi" => 928,
        "Rho" => 929,
        "Sigma" => 931,
        "Tau" => 932,
        "Upsilon" => 933,
        "Phi" => 934,
        "Chi" => 935,
        "Psi" => 936,
        "Omega" => 937,
        "alpha" => 945,
        "beta" => 946,
        "gamma" => 947,
        "delta" => 948,
        "epsilon" => 949,
        "zeta" => 950,
        "eta" => 951,
        "theta" => 952,
        "iota" => 953,
        "kappa" => 954,
        "lambda" => 955,
        "mu" => 956,
        "nu" => 957,
        "xi" => 958,
        "omicron" => 959,
        "pi" => 960,
        "rho" => 961,
        "sigmaf" => 962,
        "sigma" => 963,
        "tau" => 964,
        "upsilon" => 965,
        "phi" => 966,
        "chi" => 967,
        "psi" => 968,
        "omega" => 969,
        "thetasym" => 977,
        "upsih" => 978,
        "piv" => 982,
        "ensp" => 8194,
        "emsp" => 8195,
        "thinsp" => 8201,
        "zwnj" => 8204,
        "zwj" => 8205,
        "lrm" => 8206,
        "rlm" => 8207,
        "ndash" => 8211,
        "mdash" => 8212,
        "lsquo" => 8216,
        "rsquo" => 8217,
        "sbquo" => 8218,
        "ldquo" => 8220,
        "rdquo" => 8221,
        "bdquo" => 8222,
        "dagger" => 8224,
        "Dagger" => 8225,
        "bull" => 8226,
        "hellip" => 8230,
        "permil" => 8240,
        "prime" => 8242,
        "Prime" => 8243,
        "lsaquo" => 8249,
        "rsaquo" => 8250,
        "oline" => 8254,
        "frasl" => 8260,
        "euro" => 8364,
        "image" => 8465,
        "weierp" => 8472,
        "real" => 8476,
        "trade" => 8482,
        "alefsym" => 8501,
        "larr" => 8592,
        "uarr" => 8593,
        "rarr" => 8594,
        "darr" => 8595,
        "harr" => 8596,
        "crarr" => 8629,
        "lArr" => 8656,
        "uArr" => 8657,
        "rArr" => 8658,
        "dArr" => 8659,
        "hArr" => 8660,
        "forall" => 8704,
        "part" => 8706,
        "exist" => 8707,
        "empty" => 8709,
        "nabla" => 8711,
        "isin" => 8712,
        "notin" => 8713,
        "ni" => 8715,
        "prod" => 8719,
        "sum" => 8721,
        "minus" => 8722,
        "lowast" => 8727,
        "radic" => 8730,
        "prop" => 8733,
        "infin" => 8734,
        "ang" => 8736,
        "and" => 8743,
        "or" => 8744,
        "cap" => 8745,
        "cup" => 8746,
        "int" => 8747,
        "there4" => 8756,
        "sim" => 8764,
        "cong" => 8773,
        "asymp" => 8776,
        "ne" => 8800,
        "equiv" => 8801,
        "le" => 8804,
        "ge" => 8805,
        "sub" => 8834,
        "sup" => 8835,
        "nsub" => 8836,
        "sube" => 8838,
        "supe" => 8839,
        "oplus" => 8853,
        "otimes" => 8855,
        "perp" => 8869,
        "sdot" => 8901,
        "lceil" => 8968,
        "rceil" => 8969,
        "lfloor" => 8970,
        "rfloor" => 8971,
        "lang" => 9001,
        "rang" => 9002,
        "loz" => 9674,
        "spades" => 9824,
        "clubs" => 9827,
        "hearts" => 9829,
        "diams" => 9830,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_text_is_kept_verbatim() {
        assert_eq!(
            fixup_whitespace_and_decode_entities(" hello world ").as_deref(),
            Some(" hello world ")
        );
        assert_eq!(fixup_whitespace_and_decode_entities(" ").as_deref(), Some(" "));
    }

    #[test]
    fn lines_are_trimmed_and_joined() {
        let text = "\n    first line\n\n      second   line\n  ";
        assert_eq!(
            fixup_whitespace_and_decode_entities(text).as_deref(),
            Some("first line second   line")
        );
    }

    #[test]
    fn outer_edges_keep_their_whitespace() {
        assert_eq!(
            fixup_whitespace_and_decode_entities("  a  \n  b  ").as_deref(),
            Some("  a b  ")
        );
        assert_eq!(
            fixup_whitespace_and_decode_entities("a\r\n  b").as_deref(),
            Some("a b")
        );
    }

    #[test]
    fn whitespace_spanning_lines_disappears() {
        assert_eq!(fixup_whitespace_and_decode_entities("\n    \n  "), None);
        assert_eq!(fixup_whitespace_and_decode_entities("  \n"), None);
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&copy;&#169;&#xA9;"), "\u{a9}\u{a9}\u{a9}");
        assert_eq!(decode_entities("&nbsp;"), "\u{a0}");
        assert_eq!(decode_entities("&mdash;"), "\u{2014}");
    }

    #[test]
    fn unknown_entities_are_kept() {
        assert_eq!(decode_entities("&bogus; & &#xZZ; &;"), "&bogus; & &#xZZ; &;");
        assert!(matches!(decode_entities("plain"), Cow::Borrowed("plain")));
    }
}
