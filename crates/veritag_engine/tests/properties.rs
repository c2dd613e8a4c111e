//! Property tests for the tagging model and tokenizer.
//!
//! 1. Coverage: any sequence of tag calls keeps intervals sorted, gapless,
//!    and spanning the whole text.
//! 2. Idempotence: tagging a range twice equals tagging it once.
//! 3. Round-trip: concatenating token text reproduces the source.
//! 4. Wildcard law: replacing any slot with a wildcard keeps the tag matching.

use proptest::prelude::*;
use veritag_engine::tokenizer::{KEYWORDS, PASSES};
use veritag_engine::{CompoundTag, Lexicon, Perspective, Slot, TaggedText, Tokenizer, TOP};
use veritag_source::SourceText;

fn lexicon() -> Lexicon {
    Lexicon::new()
        .keyword("wire", 1)
        .keyword("end", 2)
        .reserved("(", 1)
        .reserved(")", 2)
        .reserved(";", 3)
        .reserved("#(", 4)
        .reserved("<=", 5)
        .reserved("=", 6)
        .macro_prefix("`define", 1)
        .pair("(", ")")
}

/// A tag request `(a, b, label)`, normalized against the text length later.
fn tag_op() -> impl Strategy<Value = (usize, usize, u32)> {
    (0usize..64, 0usize..64, 0u32..4)
}

fn normalized(len: usize, (a, b, _): (usize, usize, u32)) -> (usize, usize) {
    let (a, b) = (a.min(len), b.min(len));
    (a.min(b), a.max(b))
}

fn source_text() -> impl Strategy<Value = String> {
    prop::string::string_regex(r#"[a-z ();=<#`"/*\n\\é]{0,60}"#).expect("valid regex")
}

proptest! {
    #[test]
    fn coverage_invariant_holds(len in 0usize..48, ops in prop::collection::vec(tag_op(), 0..24)) {
        let mut p = Perspective::new(len);
        for op in ops {
            let (start, stop) = normalized(len, op);
            p.tag(start, stop, op.2.into()).unwrap();
            prop_assert!(p.is_complete());
        }
    }

    #[test]
    fn out_of_range_is_rejected(len in 0usize..16, extra in 1usize..8) {
        let mut p = Perspective::new(len);
        prop_assert!(p.tag(0, len + extra, 1u32.into()).is_err());
        prop_assert!(p.is_complete());
    }

    #[test]
    fn tagging_is_idempotent(len in 1usize..48, ops in prop::collection::vec(tag_op(), 0..12), last in tag_op()) {
        let mut p = Perspective::new(len);
        for op in ops {
            let (start, stop) = normalized(len, op);
            p.tag(start, stop, op.2.into()).unwrap();
        }
        let (start, stop) = normalized(len, last);
        p.tag(start, stop, last.2.into()).unwrap();
        let once = p.clone();
        p.tag(start, stop, last.2.into()).unwrap();
        prop_assert_eq!(once, p);
    }

    #[test]
    fn tokens_round_trip_source(text in source_text()) {
        let src = SourceText::new("prop.v", text.clone());
        let tagged = Tokenizer::new(lexicon()).unwrap().tokenize(&src).unwrap();
        for name in PASSES.iter().copied().chain([TOP]) {
            prop_assert!(tagged.perspective(name).unwrap().is_complete());
            let rebuilt: String = tagged.tokens(name).unwrap().map(|t| t.text).collect();
            prop_assert_eq!(&rebuilt, &text);
        }
    }

    #[test]
    fn later_passes_only_refine_generic_text(text in source_text()) {
        let src = SourceText::new("prop.v", text);
        let tagged = Tokenizer::new(lexicon()).unwrap().tokenize(&src).unwrap();
        // Anything classified in an earlier pass keeps its tag in the last one.
        let last = tagged.perspective(KEYWORDS).unwrap();
        for name in PASSES {
            for iv in tagged.perspective(name).unwrap() {
                if !iv.tag.is_generic() {
                    prop_assert_eq!(last.tag_at(iv.span.start), Some(&iv.tag));
                }
            }
        }
    }

    #[test]
    fn wildcard_law(a in 0u32..8, b in 0u32..8, c in 0u32..8, mask in 0u8..8) {
        let concrete: CompoundTag = (a, b, c).into();
        let pick = |i: u8, v: u32| if mask & (1 << i) != 0 { Slot::Any } else { Slot::Is(v) };
        let wild = CompoundTag::new([pick(0, a), pick(1, b), pick(2, c)]);
        prop_assert!(concrete.matches(&wild));
        prop_assert!(wild.matches(&concrete));
    }

    #[test]
    fn perspective_copies_are_independent(text in "[a-z]{1,20}", cut in 0usize..20) {
        let src = SourceText::new("prop", text);
        let mut tagged = TaggedText::new(&src);
        tagged.copy_perspective(TOP, "branch").unwrap();
        let cut = cut.min(src.len());
        tagged.tag("branch", 0, cut, 9u32).unwrap();
        prop_assert_eq!(tagged.perspective(TOP).unwrap(), &Perspective::new(src.len()));
    }
}
