//! Parser for Go type expressions written in model files.
//!
//! Supports the subset of Go type syntax that shows up in interface method
//! signatures: predeclared and named types, `pkg.Name` qualified types,
//! pointers, slices, arrays, maps, channels, function types and the empty
//! `interface{}` / `struct{}` literals.

use indexmap::IndexMap;

use crate::{ChanDir, FuncType, Type, is_predeclared};

/// Error produced while parsing a type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExprError {
    /// Byte offset into the expression where the problem was found
    pub offset: usize,
    pub message: String,
}

impl std::fmt::Display for TypeExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for TypeExprError {}

/// Resolution context for type expressions.
#[derive(Debug, Clone, Copy)]
pub struct TypeScope<'a> {
    /// Import qualifier -> import path
    pub imports: &'a IndexMap<String, String>,
    /// Import path that unqualified named types belong to
    pub local_package: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Int(u64),
    Dot,
    Ellipsis,
    Star,
    Arrow,
    LBrack,
    RBrack,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(s) => format!("'{}'", s),
            Token::Int(n) => format!("'{}'", n),
            Token::Dot => "'.'".to_string(),
            Token::Ellipsis => "'...'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Arrow => "'<-'".to_string(),
            Token::LBrack => "'['".to_string(),
            Token::RBrack => "']'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }

    /// Whether this token can begin a type.
    fn starts_type(&self) -> bool {
        matches!(
            self,
            Token::Ident(_) | Token::Star | Token::Arrow | Token::LBrack | Token::LParen
        )
    }
}

fn tokenize(src: &str) -> Result<Vec<(Token, usize)>, TypeExprError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let mut ident = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push((Token::Ident(ident), pos));
            continue;
        }

        if c.is_ascii_digit() {
            let mut digits = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_ascii_digit() {
                    digits.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            let n = digits.parse().map_err(|_| TypeExprError {
                offset: pos,
                message: format!("array length '{}' is too large", digits),
            })?;
            tokens.push((Token::Int(n), pos));
            continue;
        }

        chars.next();
        let token = match c {
            '.' => {
                if src[pos..].starts_with("...") {
                    chars.next();
                    chars.next();
                    Token::Ellipsis
                } else {
                    Token::Dot
                }
            }
            '<' if src[pos..].starts_with("<-") => {
                chars.next();
                Token::Arrow
            }
            '*' => Token::Star,
            '[' => Token::LBrack,
            ']' => Token::RBrack,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            ',' => Token::Comma,
            other => {
                return Err(TypeExprError {
                    offset: pos,
                    message: format!("unexpected character '{}'", other),
                });
            }
        };
        tokens.push((token, pos));
    }

    tokens.push((Token::Eof, src.len()));
    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    scope: TypeScope<'a>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    fn peek_at(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx].0
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos].1
    }

    fn next(&mut self) -> Token {
        let token = self.tokens[self.pos].0.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn error(&self, message: impl Into<String>) -> TypeExprError {
        TypeExprError {
            offset: self.offset(),
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), TypeExprError> {
        if *self.peek() == expected {
            self.next();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {}, found {}",
                expected.describe(),
                self.peek().describe()
            )))
        }
    }

    fn parse_type(&mut self) -> Result<Type, TypeExprError> {
        match self.peek().clone() {
            Token::Star => {
                self.next();
                Ok(Type::pointer(self.parse_type()?))
            }
            Token::LBrack => {
                self.next();
                match self.next() {
                    Token::RBrack => Ok(Type::slice(self.parse_type()?)),
                    Token::Int(len) => {
                        self.expect(Token::RBrack)?;
                        Ok(Type::Array {
                            len,
                            elem: Box::new(self.parse_type()?),
                        })
                    }
                    other => Err(self.error(format!(
                        "expected array length or ']', found {}",
                        other.describe()
                    ))),
                }
            }
            Token::Arrow => {
                self.next();
                match self.next() {
                    Token::Ident(kw) if kw == "chan" => Ok(Type::Chan {
                        dir: ChanDir::Recv,
                        elem: Box::new(self.parse_type()?),
                    }),
                    other => Err(self.error(format!(
                        "expected 'chan' after '<-', found {}",
                        other.describe()
                    ))),
                }
            }
            Token::LParen => {
                self.next();
                let ty = self.parse_type()?;
                self.expect(Token::RParen)?;
                Ok(ty)
            }
            Token::Ident(name) => {
                self.next();
                self.parse_ident_type(name)
            }
            other => Err(self.error(format!("expected a type, found {}", other.describe()))),
        }
    }

    fn parse_ident_type(&mut self, name: String) -> Result<Type, TypeExprError> {
        match name.as_str() {
            "map" => {
                self.expect(Token::LBrack)?;
                let key = self.parse_type()?;
                self.expect(Token::RBrack)?;
                let value = self.parse_type()?;
                Ok(Type::map(key, value))
            }
            "chan" => {
                let dir = if *self.peek() == Token::Arrow {
                    self.next();
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(Type::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                })
            }
            "func" => Ok(Type::Func(self.parse_signature()?)),
            "interface" | "struct" => {
                self.expect(Token::LBrace)?;
                if *self.peek() != Token::RBrace {
                    return Err(self.error(format!(
                        "only the empty {}{{}} literal is supported",
                        name
                    )));
                }
                self.next();
                Ok(if name == "interface" {
                    Type::Interface
                } else {
                    Type::Struct
                })
            }
            _ if *self.peek() == Token::Dot => {
                let qualifier_offset = self.tokens[self.pos - 1].1;
                self.next();
                let member = match self.next() {
                    Token::Ident(member) => member,
                    other => {
                        return Err(self.error(format!(
                            "expected a type name after '{}.', found {}",
                            name,
                            other.describe()
                        )));
                    }
                };
                match self.scope.imports.get(&name) {
                    Some(path) => Ok(Type::qualified(path.clone(), member)),
                    None => Err(TypeExprError {
                        offset: qualifier_offset,
                        message: format!("unknown import qualifier '{}'", name),
                    }),
                }
            }
            _ if is_predeclared(&name) => Ok(Type::Predeclared(name)),
            _ => Ok(Type::Named {
                package: self.scope.local_package.map(str::to_string),
                name,
            }),
        }
    }

    /// Parse `(params) results` after the `func` keyword.
    fn parse_signature(&mut self) -> Result<FuncType, TypeExprError> {
        let mut func = FuncType::default();

        self.expect(Token::LParen)?;
        while *self.peek() != Token::RParen {
            if func.variadic.is_some() {
                return Err(self.error("variadic parameter must be last"));
            }
            self.skip_param_name();
            if *self.peek() == Token::Ellipsis {
                self.next();
                func.variadic = Some(Box::new(self.parse_type()?));
            } else {
                func.params.push(self.parse_type()?);
            }
            if *self.peek() == Token::Comma {
                self.next();
            } else {
                break;
            }
        }
        self.expect(Token::RParen)?;

        if *self.peek() == Token::LParen {
            self.next();
            while *self.peek() != Token::RParen {
                self.skip_param_name();
                func.results.push(self.parse_type()?);
                if *self.peek() == Token::Comma {
                    self.next();
                } else {
                    break;
                }
            }
            self.expect(Token::RParen)?;
        } else if self.peek().starts_type() {
            func.results.push(self.parse_type()?);
        }

        Ok(func)
    }

    /// Drop a leading parameter name (`ctx context.Context`).
    fn skip_param_name(&mut self) {
        if let Token::Ident(_) = self.peek() {
            let follower = self.peek_at(1);
            if follower.starts_type() || *follower == Token::Ellipsis {
                self.next();
            }
        }
    }
}

/// Parse a Go type expression.
pub fn parse_type(src: &str, scope: TypeScope<'_>) -> Result<Type, TypeExprError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        scope,
    };

    if *parser.peek() == Token::Eof {
        return Err(parser.error("type expression is empty"));
    }

    let ty = parser.parse_type()?;
    if *parser.peek() != Token::Eof {
        return Err(parser.error(format!(
            "unexpected {} after type",
            parser.peek().describe()
        )));
    }
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imports() -> IndexMap<String, String> {
        IndexMap::from([
            ("http".to_string(), "net/http".to_string()),
            ("ctx".to_string(), "context".to_string()),
        ])
    }

    fn parse(src: &str) -> Result<Type, TypeExprError> {
        let imports = imports();
        parse_type(
            src,
            TypeScope {
                imports: &imports,
                local_package: Some("github.com/acme/store"),
            },
        )
    }

    #[test]
    fn test_predeclared_and_local() {
        assert_eq!(parse("error").unwrap(), Type::predeclared("error"));
        assert_eq!(
            parse("Item").unwrap(),
            Type::qualified("github.com/acme/store", "Item")
        );
    }

    #[test]
    fn test_local_without_package_path() {
        let imports = imports();
        let ty = parse_type(
            "Item",
            TypeScope {
                imports: &imports,
                local_package: None,
            },
        )
        .unwrap();
        assert_eq!(ty, Type::local("Item"));
    }

    #[test]
    fn test_qualified_resolves_through_imports() {
        assert_eq!(
            parse("*http.Request").unwrap(),
            Type::pointer(Type::qualified("net/http", "Request"))
        );
        assert_eq!(
            parse("ctx.Context").unwrap(),
            Type::qualified("context", "Context")
        );
    }

    #[test]
    fn test_unknown_qualifier() {
        let err = parse("[]zap.Field").unwrap_err();
        assert_eq!(err.offset, 2);
        assert!(err.message.contains("unknown import qualifier 'zap'"));
    }

    #[test]
    fn test_composite_types() {
        assert_eq!(
            parse("map[string][]*http.Cookie").unwrap(),
            Type::map(
                Type::predeclared("string"),
                Type::slice(Type::pointer(Type::qualified("net/http", "Cookie")))
            )
        );
        assert_eq!(
            parse("[16]byte").unwrap(),
            Type::Array {
                len: 16,
                elem: Box::new(Type::predeclared("byte")),
            }
        );
        assert_eq!(parse("interface{}").unwrap(), Type::Interface);
        assert_eq!(parse("struct {}").unwrap(), Type::Struct);
        assert_eq!(parse("(int)").unwrap(), Type::predeclared("int"));
    }

    #[test]
    fn test_channels() {
        assert_eq!(
            parse("<-chan int").unwrap(),
            Type::Chan {
                dir: ChanDir::Recv,
                elem: Box::new(Type::predeclared("int")),
            }
        );
        assert_eq!(
            parse("chan<- error").unwrap(),
            Type::Chan {
                dir: ChanDir::Send,
                elem: Box::new(Type::predeclared("error")),
            }
        );
        assert_eq!(
            parse("chan struct{}").unwrap(),
            Type::Chan {
                dir: ChanDir::Both,
                elem: Box::new(Type::Struct),
            }
        );
    }

    #[test]
    fn test_func_types() {
        let ty = parse("func(ctx ctx.Context, int, opts ...string) (bool, error)").unwrap();
        assert_eq!(
            ty,
            Type::Func(FuncType {
                params: vec![
                    Type::qualified("context", "Context"),
                    Type::predeclared("int"),
                ],
                variadic: Some(Box::new(Type::predeclared("string"))),
                results: vec![Type::predeclared("bool"), Type::predeclared("error")],
            })
        );

        let ty = parse("func() error").unwrap();
        assert_eq!(
            ty,
            Type::Func(FuncType {
                results: vec![Type::predeclared("error")],
                ..Default::default()
            })
        );

        assert_eq!(parse("func()").unwrap(), Type::Func(FuncType::default()));
    }

    #[test]
    fn test_func_type_as_map_value() {
        let ty = parse("map[string]func(int) int").unwrap();
        let Type::Map { value, .. } = ty else {
            panic!("expected map type");
        };
        assert_eq!(
            *value,
            Type::Func(FuncType {
                params: vec![Type::predeclared("int")],
                variadic: None,
                results: vec![Type::predeclared("int")],
            })
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse("").unwrap_err().message.contains("empty"));
        assert!(parse("int string").unwrap_err().message.contains("after type"));
        assert!(parse("map[string").unwrap_err().message.contains("expected ']'"));
        assert!(
            parse("interface{ Close() error }")
                .unwrap_err()
                .message
                .contains("only the empty interface{}")
        );
        assert!(
            parse("func(...int, string)")
                .unwrap_err()
                .message
                .contains("variadic parameter must be last")
        );
        assert_eq!(parse("int$").unwrap_err().offset, 3);
    }
}
