use super::*;

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::new(name))
    }

    pub fn literal(value: LiteralValue) -> Self {
        Expression::Literal(Literal { value, loc: None })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(LiteralValue::String(value.into()))
    }

    pub fn number(value: impl Into<serde_json::Number>) -> Self {
        Self::literal(LiteralValue::Number(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Self::literal(LiteralValue::Boolean(value))
    }

    pub fn null() -> Self {
        Self::literal(LiteralValue::Null)
    }

    /// `void 0`, the absence value.
    pub fn void() -> Self {
        Self::unary(UnaryOperator::Void, Self::number(0))
    }

    pub fn array(elements: Vec<Expression>) -> Self {
        Expression::Array(ArrayExpression {
            elements,
            loc: None,
        })
    }

    pub fn object(properties: Vec<Property>) -> Self {
        Expression::Object(ObjectExpression {
            properties,
            loc: None,
        })
    }

    pub fn function(id: Option<Identifier>, params: Vec<Identifier>, body: Vec<Statement>) -> Self {
        Expression::Function(FunctionExpression {
            id,
            params,
            body: BlockStatement::new(body),
            loc: None,
        })
    }

    pub fn unary(operator: UnaryOperator, argument: Expression) -> Self {
        Expression::Unary(UnaryExpression {
            operator,
            prefix: true,
            argument: Box::new(argument),
            loc: None,
        })
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary(BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            loc: None,
        })
    }

    pub fn logical(operator: LogicalOperator, left: Expression, right: Expression) -> Self {
        Expression::Logical(LogicalExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            loc: None,
        })
    }

    pub fn assign(left: Pattern, right: Expression) -> Self {
        Expression::Assignment(AssignmentExpression {
            operator: AssignmentOperator::Assign,
            left: Box::new(left),
            right: Box::new(right),
            loc: None,
        })
    }

    pub fn conditional(test: Expression, consequent: Expression, alternate: Expression) -> Self {
        Expression::Conditional(ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            loc: None,
        })
    }

    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call(CallExpression {
            callee: Box::new(callee),
            arguments,
            loc: None,
        })
    }

    pub fn new_instance(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::New(NewExpression {
            callee: Box::new(callee),
            arguments,
            loc: None,
        })
    }

    /// `object.property` with an identifier property.
    pub fn member(object: Expression, property: impl Into<String>) -> Self {
        Expression::Member(MemberExpression {
            object: Box::new(object),
            property: Box::new(Self::identifier(property)),
            computed: false,
            loc: None,
        })
    }

    /// `object[property]`.
    pub fn index(object: Expression, property: Expression) -> Self {
        Expression::Member(MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed: true,
            loc: None,
        })
    }

    pub fn sequence(expressions: Vec<Expression>) -> Self {
        Expression::Sequence(SequenceExpression {
            expressions,
            loc: None,
        })
    }

    pub fn with_loc(mut self, loc: Option<SourceLocation>) -> Self {
        if loc.is_some() {
            *self.loc_mut() = loc;
        }
        self
    }

    pub fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Expression::Identifier(e) => e.loc.as_ref(),
            Expression::Literal(e) => e.loc.as_ref(),
            Expression::Array(e) => e.loc.as_ref(),
            Expression::Object(e) => e.loc.as_ref(),
            Expression::Function(e) => e.loc.as_ref(),
            Expression::Unary(e) => e.loc.as_ref(),
            Expression::Binary(e) => e.loc.as_ref(),
            Expression::Logical(e) => e.loc.as_ref(),
            Expression::Assignment(e) => e.loc.as_ref(),
            Expression::Conditional(e) => e.loc.as_ref(),
            Expression::Call(e) => e.loc.as_ref(),
            Expression::New(e) => e.loc.as_ref(),
            Expression::Member(e) => e.loc.as_ref(),
            Expression::Sequence(e) => e.loc.as_ref(),
        }
    }

    fn loc_mut(&mut self) -> &mut Option<SourceLocation> {
        match self {
            Expression::Identifier(e) => &mut e.loc,
            Expression::Literal(e) => &mut e.loc,
            Expression::Array(e) => &mut e.loc,
            Expression::Object(e) => &mut e.loc,
            Expression::Function(e) => &mut e.loc,
            Expression::Unary(e) => &mut e.loc,
            Expression::Binary(e) => &mut e.loc,
            Expression::Logical(e) => &mut e.loc,
            Expression::Assignment(e) => &mut e.loc,
            Expression::Conditional(e) => &mut e.loc,
            Expression::Call(e) => &mut e.loc,
            Expression::New(e) => &mut e.loc,
            Expression::Member(e) => &mut e.loc,
            Expression::Sequence(e) => &mut e.loc,
        }
    }
}

impl Statement {
    pub fn expression(expression: Expression) -> Self {
        let loc = expression.loc().cloned();
        Statement::Expression(ExpressionStatement { expression, loc })
    }

    pub fn ret(argument: Option<Expression>) -> Self {
        let loc = argument.as_ref().and_then(Expression::loc).cloned();
        Statement::Return(ReturnStatement { argument, loc })
    }

    /// Single-declarator `var name = init;`.
    pub fn var(name: impl Into<String>, init: Option<Expression>) -> Self {
        Self::declare(VariableKind::Var, vec![VariableDeclarator::new(name, init)])
    }

    pub fn declare(kind: VariableKind, declarations: Vec<VariableDeclarator>) -> Self {
        Statement::VariableDeclaration(VariableDeclaration {
            declarations,
            kind,
            loc: None,
        })
    }

    pub fn block(body: Vec<Statement>) -> Self {
        Statement::Block(BlockStatement::new(body))
    }

    pub fn if_else(test: Expression, consequent: Vec<Statement>, alternate: Vec<Statement>) -> Self {
        Statement::If(IfStatement {
            test,
            consequent: Box::new(Self::block(consequent)),
            alternate: Some(Box::new(Self::block(alternate))),
            loc: None,
        })
    }

    pub fn do_while(body: Vec<Statement>, test: Expression) -> Self {
        Statement::DoWhile(DoWhileStatement {
            body: Box::new(Self::block(body)),
            test,
            loc: None,
        })
    }

    pub fn continue_() -> Self {
        Statement::Continue(ContinueStatement {
            label: None,
            loc: None,
        })
    }

    pub fn throw(argument: Expression) -> Self {
        Statement::Throw(ThrowStatement {
            argument,
            loc: None,
        })
    }

    pub fn try_(
        block: Vec<Statement>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Statement>>,
    ) -> Self {
        Statement::Try(TryStatement {
            block: BlockStatement::new(block),
            handler,
            finalizer: finalizer.map(BlockStatement::new),
            loc: None,
        })
    }

    pub fn switch(discriminant: Expression, cases: Vec<SwitchCase>) -> Self {
        Statement::Switch(SwitchStatement {
            discriminant,
            cases,
            loc: None,
        })
    }

    pub fn with_loc(mut self, loc: Option<SourceLocation>) -> Self {
        if loc.is_some() {
            *self.loc_mut() = loc;
        }
        self
    }

    pub fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Statement::Expression(s) => s.loc.as_ref(),
            Statement::VariableDeclaration(s) => s.loc.as_ref(),
            Statement::Return(s) => s.loc.as_ref(),
            Statement::If(s) => s.loc.as_ref(),
            Statement::DoWhile(s) => s.loc.as_ref(),
            Statement::Continue(s) => s.loc.as_ref(),
            Statement::Block(s) => s.loc.as_ref(),
            Statement::Throw(s) => s.loc.as_ref(),
            Statement::Try(s) => s.loc.as_ref(),
            Statement::Switch(s) => s.loc.as_ref(),
        }
    }

    fn loc_mut(&mut self) -> &mut Option<SourceLocation> {
        match self {
            Statement::Expression(s) => &mut s.loc,
            Statement::VariableDeclaration(s) => &mut s.loc,
            Statement::Return(s) => &mut s.loc,
            Statement::If(s) => &mut s.loc,
            Statement::DoWhile(s) => &mut s.loc,
            Statement::Continue(s) => &mut s.loc,
            Statement::Block(s) => &mut s.loc,
            Statement::Throw(s) => &mut s.loc,
            Statement::Try(s) => &mut s.loc,
            Statement::Switch(s) => &mut s.loc,
        }
    }
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loc: None,
        }
    }
}

impl BlockStatement {
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body, loc: None }
    }
}

impl VariableDeclarator {
    pub fn new(name: impl Into<String>, init: Option<Expression>) -> Self {
        Self {
            id: Identifier::new(name),
            init,
        }
    }
}

impl Property {
    pub fn init(key: Expression, value: Expression) -> Self {
        Self {
            key,
            value,
            kind: PropertyKind::Init,
            computed: false,
        }
    }
}

impl CatchClause {
    pub fn new(param: impl Into<String>, body: Vec<Statement>) -> Self {
        Self {
            param: Identifier::new(param),
            body: BlockStatement::new(body),
        }
    }
}

impl SwitchCase {
    pub fn case(test: Expression, consequent: Vec<Statement>) -> Self {
        Self {
            test: Some(test),
            consequent,
        }
    }

    pub fn default(consequent: Vec<Statement>) -> Self {
        Self {
            test: None,
            consequent,
        }
    }
}

impl Pattern {
    pub fn identifier(name: impl Into<String>) -> Self {
        Pattern::Identifier(Identifier::new(name))
    }
}

impl Program {
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body, loc: None }
    }
}
