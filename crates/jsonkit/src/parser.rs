//! The pull-based structural parser: turns a character sequence into a
//! stream of [`ParseEvent`]s.
//!
//! [`Parser`] is a plain `Iterator` — nothing is buffered beyond the single
//! token of lookahead the grammar needs (e.g. to tell an empty array from
//! one with elements). A consumer that wants a materialized [`crate::Json`]
//! value should use [`crate::decode`]/[`crate::decode_bytes`], which drive a
//! `Parser` internally.
use crate::event::{ParseEvent, Position, PositionedEvent};
use crate::lexer::{Lexer, Token};
use crate::options::ParserOptions;
use crate::parse_error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    TopValue,
    Value,
    ArrayValueOrClose { after_comma: bool },
    ObjectKeyOrClose { after_comma: bool },
    Colon,
    CommaOrClose(ContainerKind),
    End,
}

/// Streams [`ParseEvent`]s out of a character sequence.
///
/// Construct via [`Parser::new`] over any `Iterator<Item = char>`, or
/// [`crate::decode_bytes`] to parse directly from a byte buffer.
pub struct Parser<I: Iterator<Item = char>> {
    lexer: Lexer<I>,
    frames: Vec<ContainerKind>,
    expect: Expect,
    options: ParserOptions,
    done: bool,
}

impl<I: Iterator<Item = char>> Parser<I> {
    #[must_use]
    pub fn new(chars: I, options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(chars, &options),
            frames: Vec::new(),
            expect: Expect::TopValue,
            options,
            done: false,
        }
    }

    fn next_required_token(&mut self) -> Result<crate::lexer::PositionedToken, ParseError> {
        self.lexer
            .next_token()?
            .ok_or(ParseError::UnexpectedEof {
                position: self.lexer.position(),
            })
    }

    fn continuation_expect(&self) -> Expect {
        match self.frames.last() {
            Some(ContainerKind::Array) => Expect::CommaOrClose(ContainerKind::Array),
            Some(ContainerKind::Object) => Expect::CommaOrClose(ContainerKind::Object),
            None if self.options.allow_multiple_values => Expect::TopValue,
            None => Expect::End,
        }
    }

    fn push_frame(&mut self, kind: ContainerKind, position: Position) -> Result<(), ParseError> {
        if self.frames.len() as u32 + 1 > self.options.max_depth {
            return Err(ParseError::ExceededDepthLimit {
                position,
                max_depth: self.options.max_depth,
            });
        }
        self.frames.push(kind);
        Ok(())
    }

    fn value_event_from_token(
        &mut self,
        tok: crate::lexer::PositionedToken,
    ) -> Result<ParseEvent, ParseError> {
        match tok.token {
            Token::BraceOpen => {
                self.push_frame(ContainerKind::Object, tok.position)?;
                self.expect = Expect::ObjectKeyOrClose { after_comma: false };
                Ok(ParseEvent::ObjectStart)
            }
            Token::BracketOpen => {
                self.push_frame(ContainerKind::Array, tok.position)?;
                self.expect = Expect::ArrayValueOrClose { after_comma: false };
                Ok(ParseEvent::ArrayStart)
            }
            Token::String(s) => {
                self.expect = self.continuation_expect();
                Ok(ParseEvent::StringValue(s))
            }
            Token::Number(lexeme) => {
                self.expect = self.continuation_expect();
                Ok(number_event(&lexeme, self.options.use_decimals()))
            }
            Token::True => {
                self.expect = self.continuation_expect();
                Ok(ParseEvent::BooleanValue(true))
            }
            Token::False => {
                self.expect = self.continuation_expect();
                Ok(ParseEvent::BooleanValue(false))
            }
            Token::Null => {
                self.expect = self.continuation_expect();
                Ok(ParseEvent::NullValue)
            }
            Token::BraceClose | Token::BracketClose | Token::Colon | Token::Comma => {
                Err(unexpected_token(&tok))
            }
        }
    }

    fn advance(&mut self) -> Result<Option<PositionedEvent>, ParseError> {
        loop {
            match self.expect {
                Expect::End => {
                    return match self.lexer.next_token()? {
                        None => Ok(None),
                        Some(tok) => Err(ParseError::TrailingData {
                            position: tok.position,
                        }),
                    };
                }
                Expect::TopValue => match self.lexer.next_token()? {
                    None => return Ok(None),
                    Some(tok) => {
                        let position = tok.position;
                        let event = self.value_event_from_token(tok)?;
                        return Ok(Some(PositionedEvent { event, position }));
                    }
                },
                Expect::Value => {
                    let tok = self.next_required_token()?;
                    let position = tok.position;
                    let event = self.value_event_from_token(tok)?;
                    return Ok(Some(PositionedEvent { event, position }));
                }
                Expect::ArrayValueOrClose { after_comma } => {
                    let tok = self.next_required_token()?;
                    if matches!(tok.token, Token::BracketClose) {
                        if after_comma && self.options.strict {
                            return Err(unexpected_token(&tok));
                        }
                        let position = tok.position;
                        self.frames.pop();
                        self.expect = self.continuation_expect();
                        return Ok(Some(PositionedEvent {
                            event: ParseEvent::ArrayEnd,
                            position,
                        }));
                    }
                    let position = tok.position;
                    let event = self.value_event_from_token(tok)?;
                    return Ok(Some(PositionedEvent { event, position }));
                }
                Expect::ObjectKeyOrClose { after_comma } => {
                    let tok = self.next_required_token()?;
                    match tok.token {
                        Token::BraceClose => {
                            if after_comma && self.options.strict {
                                return Err(unexpected_token(&tok));
                            }
                            let position = tok.position;
                            self.frames.pop();
                            self.expect = self.continuation_expect();
                            return Ok(Some(PositionedEvent {
                                event: ParseEvent::ObjectEnd,
                                position,
                            }));
                        }
                        Token::String(s) => {
                            let position = tok.position;
                            self.expect = Expect::Colon;
                            return Ok(Some(PositionedEvent {
                                event: ParseEvent::StringValue(s),
                                position,
                            }));
                        }
                        _ => return Err(unexpected_token(&tok)),
                    }
                }
                Expect::Colon => {
                    let tok = self.next_required_token()?;
                    if !matches!(tok.token, Token::Colon) {
                        return Err(unexpected_token(&tok));
                    }
                    self.expect = Expect::Value;
                }
                Expect::CommaOrClose(kind) => {
                    let tok = self.next_required_token()?;
                    match (kind, tok.token) {
                        (ContainerKind::Array, Token::BracketClose) => {
                            let position = tok.position;
                            self.frames.pop();
                            self.expect = self.continuation_expect();
                            return Ok(Some(PositionedEvent {
                                event: ParseEvent::ArrayEnd,
                                position,
                            }));
                        }
                        (ContainerKind::Object, Token::BraceClose) => {
                            let position = tok.position;
                            self.frames.pop();
                            self.expect = self.continuation_expect();
                            return Ok(Some(PositionedEvent {
                                event: ParseEvent::ObjectEnd,
                                position,
                            }));
                        }
                        (ContainerKind::Array, Token::Comma) => {
                            self.expect = Expect::ArrayValueOrClose { after_comma: true };
                        }
                        (ContainerKind::Object, Token::Comma) => {
                            self.expect = Expect::ObjectKeyOrClose { after_comma: true };
                        }
                        (_, _) => return Err(unexpected_token(&tok)),
                    }
                }
            }
        }
    }
}

fn unexpected_token(tok: &crate::lexer::PositionedToken) -> ParseError {
    let character = match &tok.token {
        Token::BraceOpen => '{',
        Token::BraceClose => '}',
        Token::BracketOpen => '[',
        Token::BracketClose => ']',
        Token::Colon => ':',
        Token::Comma => ',',
        Token::String(_) => '"',
        Token::Number(_) => '0',
        Token::True => 't',
        Token::False => 'f',
        Token::Null => 'n',
    };
    ParseError::UnexpectedCharacter {
        character,
        position: tok.position,
    }
}

fn number_event(lexeme: &str, use_decimals: bool) -> ParseEvent {
    match crate::lexer::number_to_json(lexeme, use_decimals) {
        crate::value::Json::Int64(i) => ParseEvent::Int64Value(i),
        crate::value::Json::Double(d) => ParseEvent::DoubleValue(d),
        #[cfg(feature = "decimal")]
        crate::value::Json::Decimal(d) => ParseEvent::DecimalValue(d),
        _ => unreachable!("number lexemes only ever produce number values"),
    }
}

impl<I: Iterator<Item = char>> Iterator for Parser<I> {
    type Item = Result<PositionedEvent, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(ev)) => Some(Ok(ev)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
