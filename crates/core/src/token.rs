macro_rules! token_kinds {
    ($($name:ident),+ $(,)?) => {
        /// Every token kind the emitter knows how to serialize. The wire code
        /// of a kind is its position in this list.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum TokenKind {
            $($name),+
        }

        impl TokenKind {
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$name),+];
        }
    };
}

token_kinds! {
    Script,
    Name,
    RegExp,
    String,
    Number,
    True,
    False,
    Null,
    This,
    Function,
    FunctionEnd,
    Comma,
    Lc,
    Rc,
    Lp,
    Rp,
    Lb,
    Rb,
    Eol,
    Dot,
    New,
    DelProp,
    If,
    Else,
    For,
    In,
    With,
    While,
    Do,
    Try,
    Catch,
    Finally,
    Throw,
    Switch,
    Goto,
    Break,
    Continue,
    Case,
    Default,
    Return,
    Var,
    Semi,
    Assign,
    AssignAdd,
    AssignSub,
    AssignMul,
    AssignDiv,
    AssignMod,
    AssignBitOr,
    AssignBitXor,
    AssignBitAnd,
    AssignLsh,
    AssignRsh,
    AssignUrsh,
    Hook,
    ObjLit,
    Colon,
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Sheq,
    Shne,
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
    InstanceOf,
    Lsh,
    Rsh,
    Ursh,
    TypeOf,
    Void,
    Not,
    BitNot,
    Pos,
    Neg,
    Inc,
    Dec,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl TokenKind {
    pub fn from_code(code: u16) -> Option<TokenKind> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u16 {
        self as u16
    }
}
