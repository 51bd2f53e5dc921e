//! The parse loop tying the tokenizer to the tree builder.

use bramble_common::Position;
use bramble_dom::{DomTree, QuirksMode, TreeSink};

use super::tree_builder::TreeBuilder;
use crate::config::ParserConfig;
use crate::error::{ErrorReporter, ParseError, ParseErrorCode};
use crate::tokenizer::HTMLTokenizer;

/// What a finished parse hands back.
pub struct ParseOutput<S: TreeSink> {
    /// The sink the document was built into.
    pub document: S,
    /// Parse errors in input order, subject to [`ParserConfig::report_errors`]
    /// and [`ParserConfig::max_errors`].
    pub errors: Vec<ParseError>,
    /// The document mode chosen from the DOCTYPE.
    pub quirks_mode: QuirksMode,
    /// The last `script` element closed during the parse, if any. Scripts are
    /// never run; a host may pick this up.
    pub pending_script: Option<S::Handle>,
}

/// A single-use parser over one input string.
///
/// ```
/// use bramble_dom::DomTree;
/// use bramble_html::{Parser, ParserConfig};
///
/// let output = Parser::new("<p>hi", DomTree::new(), &ParserConfig::default()).run();
/// assert!(output.document.body().is_some());
/// ```
pub struct Parser<S: TreeSink> {
    tokenizer: HTMLTokenizer,
    builder: TreeBuilder<S>,
    report_errors: bool,
    max_errors: Option<usize>,
}

/// Forwards errors to an optional reporter and keeps its own copy, honoring
/// the configured limit.
struct ErrorSink<'a> {
    reporter: Option<&'a mut dyn ErrorReporter>,
    collected: Vec<ParseError>,
    enabled: bool,
    limit: Option<usize>,
}

impl ErrorSink<'_> {
    fn report(&mut self, code: ParseErrorCode, position: Position) {
        if !self.enabled {
            return;
        }
        if self.limit.is_some_and(|limit| self.collected.len() >= limit) {
            return;
        }
        if let Some(reporter) = self.reporter.as_deref_mut() {
            reporter.report(code, position);
        }
        self.collected.push(ParseError::new(code, position));
        if self.limit == Some(self.collected.len()) {
            log::debug!(target: "bramble::tree_builder", "error limit reached, further errors dropped");
        }
    }
}

impl<S: TreeSink> Parser<S> {
    /// Prepare to parse `input` into `sink`.
    #[must_use]
    pub fn new(input: &str, sink: S, config: &ParserConfig) -> Self {
        Self {
            tokenizer: HTMLTokenizer::new(input),
            builder: TreeBuilder::new(sink, config.scripting_enabled),
            report_errors: config.report_errors,
            max_errors: config.max_errors,
        }
    }

    /// Parse to completion, collecting errors into the output.
    #[must_use]
    pub fn run(self) -> ParseOutput<S> {
        self.drive(None)
    }

    /// Parse to completion, forwarding each error to `reporter` as it
    /// happens. The output carries the same errors.
    pub fn run_with_reporter(self, reporter: &mut impl ErrorReporter) -> ParseOutput<S> {
        self.drive(Some(reporter))
    }

    fn drive(mut self, reporter: Option<&mut dyn ErrorReporter>) -> ParseOutput<S> {
        let mut errors = ErrorSink {
            reporter,
            collected: Vec::new(),
            enabled: self.report_errors,
            limit: self.max_errors,
        };
        let mut pending_script = None;

        loop {
            self.tokenizer
                .set_cdata_allowed(self.builder.adjusted_current_node_is_foreign());
            let token = self.tokenizer.next_token();
            let done = token.is_eof();
            for error in self.tokenizer.take_errors() {
                errors.report(error.code, error.position);
            }

            self.builder.process_token(token);

            let position = self.tokenizer.position();
            for code in self.builder.take_errors() {
                errors.report(code, position);
            }
            if let Some(state) = self.builder.take_tokenizer_state() {
                self.tokenizer.set_state(state);
            }
            if let Some(script) = self.builder.take_pending_script() {
                pending_script = Some(script);
            }
            if done {
                break;
            }
        }

        log::debug!(
            target: "bramble::tree_builder",
            "parsed document: {} errors, {:?}",
            errors.collected.len(),
            self.builder.quirks_mode()
        );
        ParseOutput {
            quirks_mode: self.builder.quirks_mode(),
            errors: errors.collected,
            pending_script,
            document: self.builder.into_sink(),
        }
    }
}

/// Parse a complete document into a [`DomTree`] with the default options.
#[must_use]
pub fn parse_document(input: &str) -> ParseOutput<DomTree> {
    parse_document_with(input, &ParserConfig::default())
}

/// Parse a complete document into a [`DomTree`].
#[must_use]
pub fn parse_document_with(input: &str, config: &ParserConfig) -> ParseOutput<DomTree> {
    parse_with_sink(input, DomTree::new(), config)
}

/// Parse a complete document into any [`TreeSink`].
#[must_use]
pub fn parse_with_sink<S: TreeSink>(input: &str, sink: S, config: &ParserConfig) -> ParseOutput<S> {
    Parser::new(input, sink, config).run()
}
