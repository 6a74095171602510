//! # Match Navigator
//!
//! [`Navigator`] is the mutable cursor a match attempt threads through a
//! matcher tree. It is a small `Copy` value (three offsets and a borrow of
//! the text), so backtracking is plain copy-before-attempt: a caller that
//! may retry keeps its copy and hands the matcher another.
//!
//! Three offsets, all in UTF-16 units:
//! * `start` - where the current match attempt began.
//! * `capture` - the end of the committed match.
//! * `nav` - the scan position; runs ahead of `capture` only while a
//!   ghost (zero-commitment lookahead) is pending.
//!
//! `start <= capture <= nav` always holds. A matcher must not begin a new
//! match step while a ghost is pending; that is a programmer error and
//! panics, not a match failure.

use crate::text::{Utf16Text, code_point_width};
use crate::types::CodePoint;
use core::ops::Range;

/// The cursor for one match attempt over a [`Utf16Text`].
#[derive(Clone, Copy, Debug)]
pub struct Navigator<'t> {
    text: &'t Utf16Text,
    start: usize,
    nav: usize,
    capture: usize,
}

impl<'t> Navigator<'t> {
    /// A fresh navigator at the beginning of the text.
    pub fn new(text: &'t Utf16Text) -> Self {
        Self::at(text, 0)
    }

    /// A fresh navigator at `pos`.
    pub fn at(
        text: &'t Utf16Text,
        pos: usize,
    ) -> Self {
        assert!(pos <= text.len(), "navigator position out of bounds");
        Self {
            text,
            start: pos,
            nav: pos,
            capture: pos,
        }
    }

    /// The text under the cursor.
    pub fn text(&self) -> &'t Utf16Text {
        self.text
    }

    /// Where the current match attempt began.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The scan position.
    pub fn nav(&self) -> usize {
        self.nav
    }

    /// The end of the committed match.
    pub fn capture(&self) -> usize {
        self.capture
    }

    /// The committed match length, in UTF-16 units.
    pub fn capture_len(&self) -> usize {
        self.capture - self.start
    }

    /// The pending ghost length, in UTF-16 units.
    pub fn ghost_len(&self) -> usize {
        self.nav - self.capture
    }

    /// The committed match range.
    pub fn matched_range(&self) -> Range<usize> {
        self.start..self.capture
    }

    /// Is the scan position at the end of the text?
    pub fn at_end(&self) -> bool {
        self.nav == self.text.len()
    }

    /// Panic unless the navigator is settled (no pending ghost).
    ///
    /// Every matcher calls this before its match step; a ghost match must
    /// be the final step of a sequence.
    pub fn assert_settled(&self) {
        assert!(
            self.nav == self.capture,
            "navigator has a pending ghost (nav {} > capture {}); \
             a ghost match must be the final step of a sequence",
            self.nav,
            self.capture,
        );
    }

    /// Panic unless the navigator is in its initial state.
    ///
    /// Position-only matchers that describe the context of a match
    /// attempt must not be applied mid-match.
    pub fn assert_fresh(&self) {
        assert!(
            self.start == self.nav && self.nav == self.capture,
            "navigator is mid-match (start {}, capture {}, nav {}); \
             expected a fresh navigator",
            self.start,
            self.capture,
            self.nav,
        );
    }

    /// Advance `nav` and `capture` together by `len` units.
    pub fn advance_capture(
        &mut self,
        len: usize,
    ) {
        self.assert_settled();
        let next = self.capture + len;
        assert!(next <= self.text.len(), "capture advanced past end of text");
        self.capture = next;
        self.nav = next;
    }

    /// Advance `nav` and `capture` together over the code point at the
    /// cursor (1 or 2 units).
    ///
    /// Panics at end of text; callers peek first.
    pub fn advance_capture_code_point(&mut self) {
        self.assert_settled();
        match self.peek_code_point() {
            Some(cp) => self.advance_capture(code_point_width(cp)),
            None => panic!("cannot advance a code point at end of text"),
        }
    }

    /// Jump `nav` and `capture` to the end of the text.
    pub fn advance_capture_to_end(&mut self) {
        self.assert_settled();
        self.capture = self.text.len();
        self.nav = self.capture;
    }

    /// Advance only `nav`, recording a zero-commitment lookahead.
    pub fn advance_ghost(
        &mut self,
        len: usize,
    ) {
        let next = self.nav + len;
        assert!(next <= self.text.len(), "ghost advanced past end of text");
        self.nav = next;
    }

    /// Begin a new match attempt at the current scan position.
    ///
    /// Sets `start = nav + extra`, then settles `nav` and `capture` onto
    /// it. This is how a scanner resumes after emitting a match.
    pub fn commit_and_reset(
        &mut self,
        extra: usize,
    ) {
        let next = self.nav + extra;
        assert!(next <= self.text.len(), "reset position past end of text");
        self.start = next;
        self.nav = next;
        self.capture = next;
    }

    /// A brand-new navigator starting at the current scan position.
    ///
    /// Used to begin an independent sub-match without committing the
    /// outer one.
    pub fn fresh_from_here(&self) -> Self {
        Self::at(self.text, self.nav)
    }

    /// The code point at the scan position.
    pub fn peek_code_point(&self) -> Option<CodePoint> {
        self.text.code_point_at(self.nav)
    }

    /// The code point ending at the scan position.
    pub fn peek_code_point_before(&self) -> Option<CodePoint> {
        self.text.code_point_before(self.nav)
    }

    /// The code point after the one at the scan position.
    pub fn peek_code_point_after(&self) -> Option<CodePoint> {
        let cp = self.peek_code_point()?;
        self.text.code_point_at(self.nav + code_point_width(cp))
    }

    /// The `len` units immediately preceding the scan position.
    pub fn peek_slice_before(
        &self,
        len: usize,
    ) -> Option<&'t [u16]> {
        let lo = self.nav.checked_sub(len)?;
        self.text.slice(lo..self.nav)
    }

    /// The `len` units at the scan position.
    pub fn peek_slice_after(
        &self,
        len: usize,
    ) -> Option<&'t [u16]> {
        self.text.slice(self.nav..self.nav + len)
    }
}
