use jso_core::lang::{is_name_byte, CONSTANT_SET};
use jso_core::{escape_string, number_to_text, AliasTable, EncodedScript, StreamError, TokenKind};
use tracing::trace;

use crate::context::AnalysisContext;

/// Which of the two passes is running. The dispatch below is shared; only
/// name/string handling differs.
pub(crate) enum Pass<'a> {
    Analyze(&'a mut AnalysisContext),
    Generate(&'a AliasTable),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScopeState {
    None,
    StartFunction,
    StartArgs,
    StartFor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameKind {
    Script,
    If,
    Else,
    For,
    With,
    While,
    Do,
    Try,
    Catch,
    Finally,
    Switch,
    ObjectLit,
}

/// One open nested construct: its kind, where its opening brace landed in
/// the output, and how many statements have been emitted directly inside.
#[derive(Debug)]
struct BlockFrame {
    kind: FrameKind,
    open_offset: Option<usize>,
    statements: u32,
}

impl BlockFrame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            open_offset: None,
            statements: 0,
        }
    }
}

pub(crate) struct Emitter<'a> {
    script: &'a EncodedScript,
    pass: Pass<'a>,
    out: String,
    blocks: Vec<BlockFrame>,
    scope: ScopeState,
    for_parens: u32,
    function_depth: u32,
    prior: Option<TokenKind>,
    last_dot: Option<usize>,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(script: &'a EncodedScript, pass: Pass<'a>) -> Self {
        Self {
            script,
            pass,
            out: String::with_capacity(script.len()),
            blocks: vec![BlockFrame::new(FrameKind::Script)],
            scope: ScopeState::None,
            for_parens: 0,
            function_depth: 0,
            prior: None,
            last_dot: None,
        }
    }

    pub(crate) fn run(mut self) -> Result<String, StreamError> {
        let mut at = 0;
        if self.script.peek_kind(0) == Some(TokenKind::Script) {
            at = 1;
        }

        while at < self.script.len() {
            let kind = self.script.kind_at(at)?;
            at = self.dispatch(kind, at + 1)?;
            self.prior = Some(kind);
        }

        Ok(self.out)
    }

    /// Serializes one token. `at` is the offset just past the token code;
    /// returns the offset of the next token.
    fn dispatch(&mut self, kind: TokenKind, at: usize) -> Result<usize, StreamError> {
        use TokenKind::*;

        match kind {
            Script => {
                return Err(StreamError::UnknownToken {
                    code: kind.code(),
                    offset: at - 1,
                })
            }

            Name | RegExp => {
                let (text, next) = self.script.read_text(at)?;
                self.emit_name(&text);
                return Ok(next);
            }

            String => {
                let (text, next) = self.script.read_text(at)?;
                self.process_name(&text, true);
                return Ok(next);
            }

            Number => {
                let (value, next) = self.script.read_number(at)?;
                let text = number_to_text(value);
                self.push(&text);
                return Ok(next);
            }

            True => {
                self.process_name("true", false);
            }
            False => {
                self.process_name("false", false);
            }
            Null => {
                self.process_name("null", false);
            }
            This => self.push("this"),

            Function => {
                self.push("function");
                self.scope = ScopeState::StartFunction;
                self.function_depth += 1;
            }
            FunctionEnd => {
                self.function_depth = self.function_depth.saturating_sub(1);
            }

            Comma => self.push(","),
            Lc => self.open_brace(),
            Rc => self.close_brace(at),
            Lp => {
                self.push("(");
                match self.scope {
                    ScopeState::StartFunction => self.scope = ScopeState::StartArgs,
                    ScopeState::StartFor => self.for_parens += 1,
                    _ => {}
                }
            }
            Rp => {
                self.push(")");
                if self.scope == ScopeState::StartFor {
                    self.for_parens -= 1;
                    if self.for_parens == 0 {
                        self.scope = ScopeState::None;
                    }
                }
            }
            Lb => self.push("["),
            Rb => self.push("]"),

            Eol => {}

            Dot => {
                self.push(".");
                self.last_dot = Some(self.out.len() - 1);
            }

            New => self.push("new"),
            DelProp => self.push("delete"),

            If => self.keyword_block("if", FrameKind::If),
            Else => self.keyword_block("else", FrameKind::Else),
            For => {
                self.keyword_block("for", FrameKind::For);
                self.scope = ScopeState::StartFor;
            }
            In => self.push(" in "),
            With => self.keyword_block("with", FrameKind::With),
            While => self.keyword_block("while", FrameKind::While),
            Do => self.keyword_block("do", FrameKind::Do),
            Try => self.keyword_block("try", FrameKind::Try),
            Catch => self.keyword_block("catch", FrameKind::Catch),
            Finally => self.keyword_block("finally", FrameKind::Finally),
            Throw => self.push("throw"),
            Switch => self.keyword_block("switch", FrameKind::Switch),

            Goto => self.push("goto"),
            Break => self.push("break"),
            Continue => self.push("continue"),
            Case => self.push("case"),
            Default => self.push("default"),
            Return => self.push("return"),

            Var => {
                // var at global scope is dropped, assignment alone suffices
                if self.function_depth > 0 {
                    self.push("var");
                }
            }

            Semi => self.statement_end(),

            Assign => self.push("="),
            AssignAdd => self.push("+="),
            AssignSub => self.push("-="),
            AssignMul => self.push("*="),
            AssignDiv => self.push("/="),
            AssignMod => self.push("%="),
            AssignBitOr => self.push("|="),
            AssignBitXor => self.push("^="),
            AssignBitAnd => self.push("&="),
            AssignLsh => self.push("<<="),
            AssignRsh => self.push(">>="),
            AssignUrsh => self.push(">>>="),

            Hook => self.push("?"),
            ObjLit | Colon => self.push(":"),
            Or => self.push("||"),
            And => self.push("&&"),
            BitOr => self.push("|"),
            BitXor => self.push("^"),
            BitAnd => self.push("&"),
            Sheq => self.push("==="),
            Shne => self.push("!=="),
            Eq => self.push("=="),
            Ne => self.push("!="),
            Le => self.push("<="),
            Lt => self.push("<"),
            Ge => self.push(">="),
            Gt => self.push(">"),
            InstanceOf => self.push(" instanceof "),
            Lsh => self.push("<<"),
            Rsh => self.push(">>"),
            Ursh => self.push(">>>"),
            TypeOf => self.push("typeof"),
            Void => self.push("void"),
            Not => self.push("!"),
            BitNot => self.push("~"),
            Pos => self.push("+"),
            Neg => self.push("-"),
            Inc => self.push("++"),
            Dec => self.push("--"),
            Add => self.push("+"),
            Sub => self.push("-"),
            Mul => self.push("*"),
            Div => self.push("/"),
            Mod => self.push("%"),
        }

        Ok(at)
    }

    fn emit_name(&mut self, text: &str) {
        if self.prior == Some(TokenKind::Dot) {
            let dot = self.last_dot;
            if self.process_name(text, false) {
                // the alias holds the name as a string, so dot access
                // becomes index access
                if let Some(open) = dot {
                    self.out.replace_range(open..=open, "[");
                    self.out.push(']');
                }
            }
        } else if CONSTANT_SET.contains(text) {
            self.process_name(text, false);
        } else {
            if let Pass::Analyze(ctx) = &mut self.pass {
                ctx.used_names.insert(text.to_string());
            }
            self.push(text);
        }
    }

    /// Tallies in pass 1, substitutes in pass 2. Returns whether an alias
    /// replaced the original text.
    fn process_name(&mut self, text: &str, quoted: bool) -> bool {
        if let Pass::Analyze(ctx) = &mut self.pass {
            ctx.freq.tally(text);
            if quoted {
                self.push_quoted(text);
            } else {
                self.push(text);
            }
            return false;
        }

        let alias = match &self.pass {
            Pass::Generate(aliases) => aliases.get(text).map(str::to_string),
            Pass::Analyze(_) => None,
        };

        match alias {
            Some(alias) => {
                self.push(&alias);
                true
            }
            None => {
                if quoted {
                    self.push_quoted(text);
                } else {
                    self.push(text);
                }
                false
            }
        }
    }

    fn keyword_block(&mut self, keyword: &str, kind: FrameKind) {
        self.push(keyword);
        self.new_block(kind);
    }

    fn new_block(&mut self, kind: FrameKind) {
        self.add_statement();
        self.blocks.push(BlockFrame::new(kind));
    }

    fn add_statement(&mut self) {
        if let Some(top) = self.blocks.last_mut() {
            top.statements += 1;
        }
    }

    fn open_brace(&mut self) {
        self.push("{");

        if self.scope == ScopeState::StartArgs {
            // a function body owns no frame
            self.scope = ScopeState::None;
            return;
        }

        let at = self.out.len() - 1;
        let object_literal = match self.blocks.last_mut() {
            Some(top) if top.open_offset.is_none() => {
                top.open_offset = Some(at);
                false
            }
            Some(_) => true,
            None => false,
        };

        if object_literal {
            self.new_block(FrameKind::ObjectLit);
        }
    }

    fn close_brace(&mut self, at: usize) {
        if self.script.peek_kind(at) != Some(TokenKind::FunctionEnd) {
            if let Some(frame) = self.blocks.pop() {
                trace!(kind = ?frame.kind, statements = frame.statements, "closed block");
            }
        }
        self.push("}");
    }

    fn statement_end(&mut self) {
        if self.scope == ScopeState::StartFor {
            // the three for-clauses are one statement
            self.push(";");
        } else {
            self.out.push('\n');
            self.add_statement();
        }
    }

    fn push_quoted(&mut self, text: &str) {
        self.out.push('"');
        self.out.push_str(&escape_string(text));
        self.out.push('"');
    }

    /// Appends text, inserting a space only where the previous byte and the
    /// next would otherwise fuse into a different token.
    fn push(&mut self, text: &str) {
        if let (Some(&last), Some(&first)) = (self.out.as_bytes().last(), text.as_bytes().first()) {
            if fuses(last, first) {
                self.out.push(' ');
            }
        }
        self.out.push_str(text);
    }
}

fn fuses(last: u8, first: u8) -> bool {
    (is_name_byte(last) && is_name_byte(first))
        || (last == b'+' && first == b'+')
        || (last == b'-' && first == b'-')
}
