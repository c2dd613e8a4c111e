//! The automata registered on each parser pass.
//!
//! Registration order is projection order: when two matches overlap, the
//! one registered later wins on the output layer. Bare keywords go first so
//! the openers and headers containing them overwrite them.

use crate::lexicon::{
    block, instance, keyword, keyword_of, statement, structure, symbol, timing,
};
use veritag_engine::category::{GENERIC, KEYWORD, RESERVED, WHITESPACE};
use veritag_engine::{CompoundTag, Grouper, Pattern, Slot, TagValue, Token};

use structure::{BLOCK, INSTANCE, STATEMENT, TIMING};

/// Keywords that can only start a new statement or block.
const BOUNDARY_KEYWORDS: [TagValue; 9] = [
    keyword::MODULE,
    keyword::ENDMODULE,
    keyword::ASSIGN,
    keyword::ALWAYS,
    keyword::INITIAL,
    keyword::BEGIN,
    keyword::END,
    keyword::GENERATE,
    keyword::ENDGENERATE,
];

/// Guard for statement bodies: a boundary keyword, or a block found by an
/// earlier pass, means the statement was never terminated.
fn crosses_boundary(token: &Token<'_>) -> bool {
    if token.tag.category() == Some(BLOCK) {
        return true;
    }
    keyword_of(&token.tag).is_some_and(|k| BOUNDARY_KEYWORDS.contains(&k))
}

fn kw(id: TagValue) -> CompoundTag {
    (KEYWORD, id).into()
}

fn sym(id: TagValue) -> CompoundTag {
    (RESERVED, id).into()
}

/// Every tag that opens a block closed by `end`.
pub(crate) fn block_openers() -> CompoundTag {
    (
        BLOCK,
        Slot::one_of([
            block::BEGIN,
            block::INITIAL,
            block::ALWAYS,
            block::IF,
            block::ELSE,
            block::FOR,
        ]),
    )
        .into()
}

/// An optional `[msb:lsb]` followed by optional whitespace.
fn range() -> Pattern {
    Pattern::new()
        .complete(sym(symbol::BRACKET_OPEN))
        .can(WHITESPACE)
}

/// `<kw> [range] name ... ;`
fn declaration(kind: impl Into<CompoundTag>) -> Pattern {
    Pattern::new()
        .must(kind)
        .must(WHITESPACE)
        .optional_group(range())
        .must(GENERIC)
        .collect(sym(symbol::SEMICOLON))
        .guard(crosses_boundary)
}

/// `name [range] <op> ... ;`
fn assignment(op: TagValue) -> Pattern {
    Pattern::new()
        .must(GENERIC)
        .optional_group(range())
        .can(WHITESPACE)
        .must(sym(op))
        .collect(sym(symbol::SEMICOLON))
        .guard(crosses_boundary)
}

/// `<kw> [(...)] begin`
fn opener(head: TagValue, condition: bool) -> Pattern {
    let p = Pattern::new().must(kw(head)).can(WHITESPACE);
    let p = if condition {
        p.complete(sym(symbol::PAREN_OPEN)).can(WHITESPACE)
    } else {
        p
    };
    p.must(kw(keyword::BEGIN))
}

/// Pass 0, over lexical tokens.
pub(crate) fn statements(g: &mut Grouper) {
    g.add("begin", (BLOCK, block::BEGIN), Pattern::new().must(kw(keyword::BEGIN)))
        .add("end", (BLOCK, block::END), Pattern::new().must(kw(keyword::END)))
        .add(
            "endmodule",
            (BLOCK, block::ENDMODULE),
            Pattern::new().must(kw(keyword::ENDMODULE)),
        )
        .add(
            "generate",
            (BLOCK, block::GENERATE),
            Pattern::new().must(kw(keyword::GENERATE)),
        )
        .add(
            "endgenerate",
            (BLOCK, block::ENDGENERATE),
            Pattern::new().must(kw(keyword::ENDGENERATE)),
        )
        .add(
            "delays",
            (TIMING, timing::DELAY),
            Pattern::new()
                .must(sym(symbol::POUND))
                .can(WHITESPACE)
                .must(GENERIC),
        )
        .add(
            "portmaps",
            (INSTANCE, instance::PORTMAP),
            Pattern::new()
                .must(sym(symbol::DOT))
                .must(GENERIC)
                .can(WHITESPACE)
                .complete(sym(symbol::PAREN_OPEN)),
        )
        .add(
            "params",
            (INSTANCE, instance::PARAMS),
            Pattern::new().complete(sym(symbol::POUND_PAREN)),
        )
        .add(
            "attributes",
            (STATEMENT, statement::ATTRIBUTES),
            Pattern::new().complete(sym(symbol::ATTR_OPEN)),
        )
        .add(
            "wiredecs",
            (STATEMENT, statement::WIREDECS),
            declaration(kw(keyword::WIRE)),
        )
        .add(
            "regdecs",
            (STATEMENT, statement::REGDECS),
            declaration((
                KEYWORD,
                Slot::one_of([keyword::REG, keyword::LOGIC, keyword::INTEGER]),
            )),
        )
        .add(
            "genvars",
            (STATEMENT, statement::GENVARS),
            declaration(kw(keyword::GENVAR)),
        )
        .add(
            "localparams",
            (STATEMENT, statement::LOCALPARAMS),
            declaration(kw(keyword::LOCALPARAM)),
        )
        .add(
            "ports",
            (STATEMENT, statement::PORTS),
            Pattern::new()
                .must((
                    KEYWORD,
                    Slot::one_of([keyword::INPUT, keyword::OUTPUT, keyword::INOUT]),
                ))
                .must(WHITESPACE)
                .can((
                    KEYWORD,
                    Slot::one_of([keyword::WIRE, keyword::REG, keyword::LOGIC]),
                ))
                .can(WHITESPACE)
                .optional_group(range())
                .must(GENERIC)
                .collect((
                    RESERVED,
                    Slot::one_of([symbol::COMMA, symbol::PAREN_CLOSE, symbol::SEMICOLON]),
                ))
                .guard(crosses_boundary),
        )
        .add(
            "parameters",
            (STATEMENT, statement::PARAMETERS),
            Pattern::new()
                .must(kw(keyword::PARAMETER))
                .must(WHITESPACE)
                .optional_group(range())
                .must(GENERIC)
                .collect((
                    RESERVED,
                    Slot::one_of([symbol::COMMA, symbol::PAREN_CLOSE, symbol::SEMICOLON]),
                ))
                .guard(crosses_boundary),
        )
        .add(
            "assigns",
            (STATEMENT, statement::ASSIGNS),
            Pattern::new()
                .must(kw(keyword::ASSIGN))
                .must(WHITESPACE)
                .must(GENERIC)
                .optional_group(range())
                .can(WHITESPACE)
                .must(sym(symbol::EQUAL))
                .collect(sym(symbol::SEMICOLON))
                .guard(crosses_boundary),
        )
        .add(
            "initial_blocks",
            (BLOCK, block::INITIAL),
            opener(keyword::INITIAL, false),
        )
        .add(
            "always_blocks",
            (BLOCK, block::ALWAYS),
            Pattern::new()
                .must(kw(keyword::ALWAYS))
                .can(WHITESPACE)
                .must(sym(symbol::AT))
                .can(WHITESPACE)
                .complete(sym(symbol::PAREN_OPEN))
                .can(WHITESPACE)
                .must(kw(keyword::BEGIN)),
        )
        .add(
            "always_star_blocks",
            (BLOCK, block::ALWAYS),
            Pattern::new()
                .must(kw(keyword::ALWAYS))
                .can(WHITESPACE)
                .must((
                    RESERVED,
                    Slot::one_of([symbol::AT_STAR, symbol::AT_STAR_PAREN]),
                ))
                .can(WHITESPACE)
                .must(kw(keyword::BEGIN)),
        )
        .add("if_blocks", (BLOCK, block::IF), opener(keyword::IF, true))
        .add("else_blocks", (BLOCK, block::ELSE), opener(keyword::ELSE, false))
        .add("for_blocks", (BLOCK, block::FOR), opener(keyword::FOR, true))
        .add(
            "modules",
            (BLOCK, block::MODULE),
            Pattern::new()
                .must(kw(keyword::MODULE))
                .must(WHITESPACE)
                .must(GENERIC)
                .can(WHITESPACE)
                .optional_group(
                    Pattern::new()
                        .complete(sym(symbol::POUND_PAREN))
                        .can(WHITESPACE),
                )
                .optional_group(
                    Pattern::new()
                        .complete(sym(symbol::PAREN_OPEN))
                        .can(WHITESPACE),
                )
                .must(sym(symbol::SEMICOLON)),
        );
}

/// Pass 1, over the statement layer.
pub(crate) fn assignments(g: &mut Grouper) {
    g.add(
        "nonblocking",
        (STATEMENT, statement::NONBLOCKING),
        assignment(symbol::NONBLOCKING),
    )
    .add(
        "blocking",
        (STATEMENT, statement::BLOCKING),
        assignment(symbol::EQUAL),
    )
    .add(
        "delayed_always_blocks",
        (BLOCK, block::ALWAYS),
        Pattern::new()
            .must(kw(keyword::ALWAYS))
            .can(WHITESPACE)
            .must((TIMING, timing::DELAY))
            .can(WHITESPACE)
            .must((BLOCK, block::BEGIN)),
    );
}

/// Pass 2, over the assignment layer.
pub(crate) fn blocks(g: &mut Grouper) {
    g.pair(block_openers(), (BLOCK, block::END))
        .pair((BLOCK, block::GENERATE), (BLOCK, block::ENDGENERATE))
        .add(
            "instances",
            (INSTANCE, instance::MODULE),
            Pattern::new()
                .must(GENERIC)
                .can(WHITESPACE)
                .optional_group(
                    Pattern::new()
                        .must((INSTANCE, instance::PARAMS))
                        .can(WHITESPACE),
                )
                .must(GENERIC)
                .can(WHITESPACE)
                .complete(sym(symbol::PAREN_OPEN))
                .can(WHITESPACE)
                .must(sym(symbol::SEMICOLON)),
        )
        .add(
            "blocks",
            (BLOCK, block::SEQUENTIAL),
            Pattern::new().complete(block_openers()),
        )
        .add(
            "generate_regions",
            (BLOCK, block::GENERATE_REGION),
            Pattern::new().complete((BLOCK, block::GENERATE)),
        );
}
