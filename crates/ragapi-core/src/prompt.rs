//! Prompt template parsing and rendering
//!
//! Templates use `{name}` placeholders with `{{` and `}}` as escapes for literal
//! braces. Only two names are known: [`QUESTION_VAR`] and [`CONTEXT_VAR`].
//! A template is parsed once, so a bad template is rejected at startup rather
//! than on the first request.

use serde::{Serialize, Serializer};

use crate::{Error, Result};

pub const QUESTION_VAR: &str = "question";
pub const CONTEXT_VAR: &str = "context";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variable {
    Question,
    Context,
}

impl Variable {
    fn from_name(name: &str) -> Result<Self> {
        match name {
            QUESTION_VAR => Ok(Variable::Question),
            CONTEXT_VAR => Ok(Variable::Context),
            "" => Err(Error::Template(
                "empty placeholder '{}' is not allowed".to_string(),
            )),
            other => Err(Error::Template(format!(
                "unknown placeholder '{{{}}}', expected '{{{}}}' or '{{{}}}'",
                other, QUESTION_VAR, CONTEXT_VAR
            ))),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Variable::Question => QUESTION_VAR,
            Variable::Context => CONTEXT_VAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(Variable),
}

/// A parsed prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse a template string
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '{' => {
                    if matches!(chars.peek(), Some((_, '{'))) {
                        chars.next();
                        literal.push('{');
                        continue;
                    }

                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(Error::Template(format!(
                                    "nested '{{' in placeholder starting at byte {}",
                                    pos
                                )));
                            }
                            c => name.push(c),
                        }
                    }
                    if !closed {
                        return Err(Error::Template(format!(
                            "unclosed '{{' at byte {}",
                            pos
                        )));
                    }

                    let variable = Variable::from_name(&name)?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Variable(variable));
                }
                '}' => {
                    if matches!(chars.peek(), Some((_, '}'))) {
                        chars.next();
                        literal.push('}');
                    } else {
                        return Err(Error::Template(format!(
                            "single '}}' at byte {} must be escaped as '}}}}'",
                            pos
                        )));
                    }
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    /// Template text as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of first appearance
    pub fn variables(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Variable(var) = segment {
                if !names.contains(&var.name()) {
                    names.push(var.name());
                }
            }
        }
        names
    }

    /// Whether the template references the given placeholder name
    pub fn references(&self, name: &str) -> bool {
        self.variables().contains(&name)
    }

    /// Substitute the question and context.
    ///
    /// Values are inserted verbatim and never re-scanned for placeholders.
    pub fn render(&self, question: &str, context: &str) -> String {
        let capacity = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.len(),
                Segment::Variable(Variable::Question) => question.len(),
                Segment::Variable(Variable::Context) => context.len(),
            })
            .sum();

        let mut rendered = String::with_capacity(capacity);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Variable(Variable::Question) => rendered.push_str(question),
                Segment::Variable(Variable::Context) => rendered.push_str(context),
            }
        }
        rendered
    }
}

impl Serialize for PromptTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Parse `template` and substitute `question` and `context` in one step
pub fn render(template: &str, question: &str, context: &str) -> Result<String> {
    Ok(PromptTemplate::parse(template)?.render(question, context))
}
