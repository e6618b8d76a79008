//! Analyzed, macro-expanded IR handed to the lowering stage.
//!
//! The analyzer serializes each form as a JSON object tagged by `"op"`. Nodes
//! are immutable input: the lowering only borrows them.

use crate::source_location::SourceLocation;
use crate::{IrError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum NodeKind {
    Nil,
    Constant {
        value: Value,
        #[serde(rename = "type")]
        ty: ConstantType,
    },
    Keyword {
        name: String,
    },
    Var {
        name: String,
    },
    Vector {
        #[serde(default)]
        items: Vec<Node>,
    },
    Dictionary {
        #[serde(default)]
        keys: Vec<Node>,
        #[serde(default)]
        values: Vec<Node>,
    },
    Invoke(Invoke),
    New {
        constructor: Box<Node>,
        #[serde(default)]
        params: Vec<Node>,
    },
    Def {
        var: Box<Node>,
        #[serde(default)]
        init: Option<Box<Node>>,
        #[serde(default)]
        export: bool,
    },
    #[serde(rename = "set!")]
    Set {
        target: Box<Node>,
        value: Box<Node>,
    },
    MemberAccess {
        target: Box<Node>,
        property: Box<Node>,
        #[serde(default)]
        computed: bool,
    },
    If {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    Throw {
        value: Box<Node>,
    },
    Try(Try),
    Do(Do),
    Let(BindingBlock),
    Loop(BindingBlock),
    Recur {
        #[serde(default)]
        params: Vec<Node>,
    },
    Fn(Function),
    Ns(Ns),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstantType {
    Number,
    String,
    Boolean,
    Nil,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoke {
    pub callee: Box<Node>,
    #[serde(default)]
    pub params: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Try {
    pub body: Box<Node>,
    #[serde(default)]
    pub handler: Option<Handler>,
    #[serde(default)]
    pub finalizer: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handler {
    pub name: String,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Do {
    #[serde(default)]
    pub statements: Vec<Node>,
    #[serde(default)]
    pub result: Option<Box<Node>>,
}

/// Shared shape of `let` and `loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingBlock {
    #[serde(default)]
    pub bindings: Vec<Binding>,
    #[serde(default)]
    pub statements: Vec<Node>,
    #[serde(default)]
    pub result: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub init: Node,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    #[serde(default)]
    pub name: Option<String>,
    pub methods: Vec<FnMethod>,
}

/// One overload. `arity` counts fixed parameters only; a variadic method
/// carries its rest parameter as the last entry of `params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FnMethod {
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub variadic: bool,
    pub arity: usize,
    #[serde(default)]
    pub statements: Vec<Node>,
    #[serde(default)]
    pub result: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ns {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub require: Vec<Require>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Require {
    pub ns: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub refer: Vec<Refer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refer {
    pub name: String,
    #[serde(default)]
    pub rename: Option<String>,
}

impl NodeKind {
    /// The `op` tag as it appears on the wire.
    pub fn op(&self) -> &'static str {
        match self {
            NodeKind::Nil => "nil",
            NodeKind::Constant { .. } => "constant",
            NodeKind::Keyword { .. } => "keyword",
            NodeKind::Var { .. } => "var",
            NodeKind::Vector { .. } => "vector",
            NodeKind::Dictionary { .. } => "dictionary",
            NodeKind::Invoke(_) => "invoke",
            NodeKind::New { .. } => "new",
            NodeKind::Def { .. } => "def",
            NodeKind::Set { .. } => "set!",
            NodeKind::MemberAccess { .. } => "member-access",
            NodeKind::If { .. } => "if",
            NodeKind::Throw { .. } => "throw",
            NodeKind::Try(_) => "try",
            NodeKind::Do(_) => "do",
            NodeKind::Let(_) => "let",
            NodeKind::Loop(_) => "loop",
            NodeKind::Recur { .. } => "recur",
            NodeKind::Fn(_) => "fn",
            NodeKind::Ns(_) => "ns",
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, loc: None }
    }

    pub fn with_loc(mut self, loc: SourceLocation) -> Self {
        self.loc = Some(loc);
        self
    }

    pub fn op(&self) -> &'static str {
        self.kind.op()
    }

    pub fn nil() -> Self {
        Self::new(NodeKind::Nil)
    }

    /// Constant whose `type` is inferred from the JSON value.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        let ty = match &value {
            Value::Number(_) => ConstantType::Number,
            Value::String(_) => ConstantType::String,
            Value::Bool(_) => ConstantType::Boolean,
            _ => ConstantType::Nil,
        };
        Self::new(NodeKind::Constant { value, ty })
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Keyword { name: name.into() })
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Var { name: name.into() })
    }

    pub fn vector(items: Vec<Node>) -> Self {
        Self::new(NodeKind::Vector { items })
    }

    pub fn invoke(callee: Node, params: Vec<Node>) -> Self {
        Self::new(NodeKind::Invoke(Invoke {
            callee: Box::new(callee),
            params,
        }))
    }

    /// Invocation of a bare name, the shape special forms match on.
    pub fn call(name: impl Into<String>, params: Vec<Node>) -> Self {
        Self::invoke(Self::var(name), params)
    }

    pub fn if_(test: Node, consequent: Node, alternate: Node) -> Self {
        Self::new(NodeKind::If {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    pub fn do_(statements: Vec<Node>, result: Option<Node>) -> Self {
        Self::new(NodeKind::Do(Do {
            statements,
            result: result.map(Box::new),
        }))
    }

    pub fn let_(bindings: Vec<(&str, Node)>, statements: Vec<Node>, result: Option<Node>) -> Self {
        Self::new(NodeKind::Let(BindingBlock::new(bindings, statements, result)))
    }

    pub fn loop_(bindings: Vec<(&str, Node)>, statements: Vec<Node>, result: Option<Node>) -> Self {
        Self::new(NodeKind::Loop(BindingBlock::new(bindings, statements, result)))
    }

    pub fn recur(params: Vec<Node>) -> Self {
        Self::new(NodeKind::Recur { params })
    }

    pub fn fn_(name: Option<&str>, methods: Vec<FnMethod>) -> Self {
        Self::new(NodeKind::Fn(Function {
            name: name.map(str::to_string),
            methods,
        }))
    }

    /// The callee name when this node is an invocation of a bare `var`.
    pub fn invoked_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Invoke(invoke) => match &invoke.callee.kind {
                NodeKind::Var { name } => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

impl BindingBlock {
    pub fn new(bindings: Vec<(&str, Node)>, statements: Vec<Node>, result: Option<Node>) -> Self {
        Self {
            bindings: bindings
                .into_iter()
                .map(|(name, init)| Binding {
                    name: name.to_string(),
                    init,
                })
                .collect(),
            statements,
            result: result.map(Box::new),
        }
    }
}

impl FnMethod {
    pub fn new(params: &[&str], statements: Vec<Node>, result: Option<Node>) -> Self {
        Self {
            params: params
                .iter()
                .map(|name| Param {
                    name: name.to_string(),
                })
                .collect(),
            variadic: false,
            arity: params.len(),
            statements,
            result: result.map(Box::new),
        }
    }

    /// Method whose last entry in `params` collects the remaining arguments.
    pub fn variadic(params: &[&str], statements: Vec<Node>, result: Option<Node>) -> Self {
        let mut method = Self::new(params, statements, result);
        method.variadic = true;
        method.arity = params.len().saturating_sub(1);
        method
    }

    pub fn fixed_params(&self) -> &[Param] {
        if self.variadic {
            &self.params[..self.params.len().saturating_sub(1)]
        } else {
            &self.params
        }
    }

    pub fn rest_param(&self) -> Option<&Param> {
        if self.variadic {
            self.params.last()
        } else {
            None
        }
    }
}

/// Reads one form or an array of forms.
pub fn read_forms(json: &str) -> Result<Vec<Node>> {
    let value: Value = serde_json::from_str(json)?;
    let forms = match value {
        Value::Array(_) => serde_json::from_value::<Vec<Node>>(value)?,
        other => vec![serde_json::from_value::<Node>(other)?],
    };

    if forms.is_empty() {
        return Err(IrError::NoForms);
    }

    Ok(forms)
}
