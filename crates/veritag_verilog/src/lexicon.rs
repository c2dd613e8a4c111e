//! Verilog keyword, symbol and macro tables.
//!
//! Ids are grouped by table; a token's tag is `(category, id)`, e.g.
//! `(category::KEYWORD, keyword::MODULE)`. Structural tags produced by the
//! parser use the categories in [`structure`] with ids from the modules that
//! follow it.

use crossterm::style::Color;
use veritag_engine::{category, ColorMap, CompoundTag, Lexicon, Slot, TagValue};

/// Keyword ids.
pub mod keyword {
    use veritag_engine::TagValue;

    /// `module`
    pub const MODULE: TagValue = 1;
    /// `endmodule`
    pub const ENDMODULE: TagValue = 2;
    /// `wire`
    pub const WIRE: TagValue = 3;
    /// `reg`
    pub const REG: TagValue = 4;
    /// `logic`
    pub const LOGIC: TagValue = 5;
    /// `integer`
    pub const INTEGER: TagValue = 6;
    /// `begin`
    pub const BEGIN: TagValue = 7;
    /// `end`
    pub const END: TagValue = 8;
    /// `always`
    pub const ALWAYS: TagValue = 9;
    /// `initial`
    pub const INITIAL: TagValue = 10;
    /// `if`
    pub const IF: TagValue = 11;
    /// `else`
    pub const ELSE: TagValue = 12;
    /// `for`
    pub const FOR: TagValue = 13;
    /// `input`
    pub const INPUT: TagValue = 14;
    /// `output`
    pub const OUTPUT: TagValue = 15;
    /// `inout`
    pub const INOUT: TagValue = 16;
    /// `parameter`
    pub const PARAMETER: TagValue = 17;
    /// `localparam`
    pub const LOCALPARAM: TagValue = 18;
    /// `assign`
    pub const ASSIGN: TagValue = 19;
    /// `posedge`
    pub const POSEDGE: TagValue = 20;
    /// `negedge`
    pub const NEGEDGE: TagValue = 21;
    /// `generate`
    pub const GENERATE: TagValue = 22;
    /// `endgenerate`
    pub const ENDGENERATE: TagValue = 23;
    /// `genvar`
    pub const GENVAR: TagValue = 24;
}

/// Reserved symbol ids.
pub mod symbol {
    use veritag_engine::TagValue;

    /// `<=`
    pub const NONBLOCKING: TagValue = 1;
    /// `=`
    pub const EQUAL: TagValue = 2;
    /// `+`
    pub const PLUS: TagValue = 3;
    /// `-`
    pub const MINUS: TagValue = 4;
    /// `*`
    pub const MUL: TagValue = 5;
    /// `/`
    pub const DIV: TagValue = 6;
    /// `(`
    pub const PAREN_OPEN: TagValue = 7;
    /// `)`
    pub const PAREN_CLOSE: TagValue = 8;
    /// `{`
    pub const BRACE_OPEN: TagValue = 9;
    /// `}`
    pub const BRACE_CLOSE: TagValue = 10;
    /// `[`
    pub const BRACKET_OPEN: TagValue = 11;
    /// `]`
    pub const BRACKET_CLOSE: TagValue = 12;
    /// `,`
    pub const COMMA: TagValue = 13;
    /// `#(`
    pub const POUND_PAREN: TagValue = 14;
    /// `;`
    pub const SEMICOLON: TagValue = 15;
    /// `:`
    pub const COLON: TagValue = 16;
    /// `==`
    pub const EQ_EQ: TagValue = 17;
    /// `!=`
    pub const NOT_EQ: TagValue = 18;
    /// `@(*)`
    pub const AT_STAR_PAREN: TagValue = 19;
    /// `@*`
    pub const AT_STAR: TagValue = 20;
    /// `(*`
    pub const ATTR_OPEN: TagValue = 21;
    /// `*)`
    pub const ATTR_CLOSE: TagValue = 22;
    /// `@`
    pub const AT: TagValue = 23;
    /// `#`
    pub const POUND: TagValue = 24;
    /// `.`
    pub const DOT: TagValue = 25;
    /// `>=`
    pub const GT_EQ: TagValue = 26;
    /// `&&`
    pub const AND_AND: TagValue = 27;
    /// `||`
    pub const OR_OR: TagValue = 28;
    /// `<<`
    pub const SHL: TagValue = 29;
    /// `>>`
    pub const SHR: TagValue = 30;
    /// `!`
    pub const BANG: TagValue = 31;
    /// `&`
    pub const AMP: TagValue = 32;
    /// `|`
    pub const PIPE: TagValue = 33;
    /// `^`
    pub const CARET: TagValue = 34;
    /// `~`
    pub const TILDE: TagValue = 35;
    /// `?`
    pub const QUESTION: TagValue = 36;
    /// `<`
    pub const LT: TagValue = 37;
    /// `>`
    pub const GT: TagValue = 38;
    /// `%`
    pub const PERCENT: TagValue = 39;
}

/// Macro ids.
pub mod macros {
    use veritag_engine::TagValue;

    /// `` `define``
    pub const DEFINE: TagValue = 1;
    /// `` `ifdef``
    pub const IFDEF: TagValue = 2;
    /// `` `ifndef``
    pub const IFNDEF: TagValue = 3;
    /// `` `else``
    pub const ELSE: TagValue = 4;
    /// `` `endif``
    pub const ENDIF: TagValue = 5;
    /// `` `include``
    pub const INCLUDE: TagValue = 6;
    /// `` `timescale``
    pub const TIMESCALE: TagValue = 7;
}

/// Structural categories, placed after the lexical ones.
pub mod structure {
    use veritag_engine::TagValue;

    /// A complete statement.
    pub const STATEMENT: TagValue = 16;
    /// A block opener, closer, or a whole block.
    pub const BLOCK: TagValue = 17;
    /// A delay.
    pub const TIMING: TagValue = 18;
    /// Parts of a module instantiation, or the whole of one.
    pub const INSTANCE: TagValue = 19;
}

/// Ids under [`structure::STATEMENT`].
pub mod statement {
    use veritag_engine::TagValue;

    /// `assign x = ...;`
    pub const ASSIGNS: TagValue = 1;
    /// `wire ...;`
    pub const WIREDECS: TagValue = 2;
    /// `reg`, `logic` or `integer` declarations.
    pub const REGDECS: TagValue = 3;
    /// `parameter` declarations.
    pub const PARAMETERS: TagValue = 4;
    /// `localparam` declarations.
    pub const LOCALPARAMS: TagValue = 5;
    /// `input`, `output` and `inout` declarations.
    pub const PORTS: TagValue = 6;
    /// `x <= ...;`
    pub const NONBLOCKING: TagValue = 7;
    /// `x = ...;`
    pub const BLOCKING: TagValue = 8;
    /// `genvar` declarations.
    pub const GENVARS: TagValue = 9;
    /// `(* ... *)`
    pub const ATTRIBUTES: TagValue = 10;
}

/// Ids under [`structure::BLOCK`].
pub mod block {
    use veritag_engine::TagValue;

    /// A bare `begin`.
    pub const BEGIN: TagValue = 1;
    /// `end`
    pub const END: TagValue = 2;
    /// `initial begin`
    pub const INITIAL: TagValue = 3;
    /// `always @(...) begin` or `always #delay begin`
    pub const ALWAYS: TagValue = 4;
    /// `if (...) begin`
    pub const IF: TagValue = 5;
    /// `else begin`
    pub const ELSE: TagValue = 6;
    /// `for (...) begin`
    pub const FOR: TagValue = 7;
    /// `module name #(...) (...);`
    pub const MODULE: TagValue = 8;
    /// `endmodule`
    pub const ENDMODULE: TagValue = 9;
    /// `generate`
    pub const GENERATE: TagValue = 10;
    /// `endgenerate`
    pub const ENDGENERATE: TagValue = 11;
    /// A whole `begin ... end` block from its opener.
    pub const SEQUENTIAL: TagValue = 12;
    /// A whole `generate ... endgenerate` region.
    pub const GENERATE_REGION: TagValue = 13;
}

/// Ids under [`structure::TIMING`].
pub mod timing {
    use veritag_engine::TagValue;

    /// `#<literal>`
    pub const DELAY: TagValue = 1;
}

/// Ids under [`structure::INSTANCE`].
pub mod instance {
    use veritag_engine::TagValue;

    /// `#( ... )`
    pub const PARAMS: TagValue = 1;
    /// `.name( ... )`
    pub const PORTMAP: TagValue = 2;
    /// `type [#(...)] name ( ... );`
    pub const MODULE: TagValue = 3;
}

const KEYWORDS: [(&str, TagValue); 24] = [
    ("module", keyword::MODULE),
    ("endmodule", keyword::ENDMODULE),
    ("wire", keyword::WIRE),
    ("reg", keyword::REG),
    ("logic", keyword::LOGIC),
    ("integer", keyword::INTEGER),
    ("begin", keyword::BEGIN),
    ("end", keyword::END),
    ("always", keyword::ALWAYS),
    ("initial", keyword::INITIAL),
    ("if", keyword::IF),
    ("else", keyword::ELSE),
    ("for", keyword::FOR),
    ("input", keyword::INPUT),
    ("output", keyword::OUTPUT),
    ("inout", keyword::INOUT),
    ("parameter", keyword::PARAMETER),
    ("localparam", keyword::LOCALPARAM),
    ("assign", keyword::ASSIGN),
    ("posedge", keyword::POSEDGE),
    ("negedge", keyword::NEGEDGE),
    ("generate", keyword::GENERATE),
    ("endgenerate", keyword::ENDGENERATE),
    ("genvar", keyword::GENVAR),
];

const SYMBOLS: [(&str, TagValue); 39] = [
    ("@(*)", symbol::AT_STAR_PAREN),
    ("@*", symbol::AT_STAR),
    ("<=", symbol::NONBLOCKING),
    ("=", symbol::EQUAL),
    ("+", symbol::PLUS),
    ("-", symbol::MINUS),
    ("*", symbol::MUL),
    ("/", symbol::DIV),
    ("(", symbol::PAREN_OPEN),
    (")", symbol::PAREN_CLOSE),
    ("{", symbol::BRACE_OPEN),
    ("}", symbol::BRACE_CLOSE),
    ("[", symbol::BRACKET_OPEN),
    ("]", symbol::BRACKET_CLOSE),
    (",", symbol::COMMA),
    ("#(", symbol::POUND_PAREN),
    (";", symbol::SEMICOLON),
    (":", symbol::COLON),
    ("==", symbol::EQ_EQ),
    ("!=", symbol::NOT_EQ),
    ("(*", symbol::ATTR_OPEN),
    ("*)", symbol::ATTR_CLOSE),
    ("@", symbol::AT),
    ("#", symbol::POUND),
    (".", symbol::DOT),
    (">=", symbol::GT_EQ),
    ("&&", symbol::AND_AND),
    ("||", symbol::OR_OR),
    ("<<", symbol::SHL),
    (">>", symbol::SHR),
    ("!", symbol::BANG),
    ("&", symbol::AMP),
    ("|", symbol::PIPE),
    ("^", symbol::CARET),
    ("~", symbol::TILDE),
    ("?", symbol::QUESTION),
    ("<", symbol::LT),
    (">", symbol::GT),
    ("%", symbol::PERCENT),
];

const MACROS: [(&str, TagValue); 7] = [
    ("`define", macros::DEFINE),
    ("`ifdef", macros::IFDEF),
    ("`ifndef", macros::IFNDEF),
    ("`else", macros::ELSE),
    ("`endif", macros::ENDIF),
    ("`include", macros::INCLUDE),
    ("`timescale", macros::TIMESCALE),
];

const PAIRS: [(&str, &str); 5] = [
    ("(", ")"),
    ("[", "]"),
    ("{", "}"),
    ("#(", ")"),
    ("(*", "*)"),
];

/// Builds the Verilog lexicon with C-style comments and `"` strings.
pub fn verilog_lexicon() -> Lexicon {
    let mut lexicon = Lexicon::new();
    for (text, id) in KEYWORDS {
        lexicon = lexicon.keyword(text, id);
    }
    for (text, id) in SYMBOLS {
        lexicon = lexicon.reserved(text, id);
    }
    for (text, id) in MACROS {
        lexicon = lexicon.macro_prefix(text, id);
    }
    for (open, close) in PAIRS {
        lexicon = lexicon.pair(open, close);
    }
    lexicon
}

/// Returns the keyword id of a `(KEYWORD, id)` tag.
pub fn keyword_of(tag: &CompoundTag) -> Option<TagValue> {
    match tag.slots() {
        [Slot::Is(category::KEYWORD), Slot::Is(id), _] => Some(*id),
        _ => None,
    }
}

/// Colors for the structural layers, falling back to lexical colors.
pub fn structure_colors() -> ColorMap {
    ColorMap::new()
        .with(structure::STATEMENT, Color::Red)
        .with(structure::BLOCK, Color::Cyan)
        .with(structure::TIMING, Color::Yellow)
        .with(structure::INSTANCE, Color::Magenta)
        .extend_from(&ColorMap::lexical())
}
