//! Token dump and whole-class rendering

use crate::engine::compile_class;
use crate::sink::{TagSink, XmlWriter};
use jack_error::Result;
use jack_lexer::TokenStream;

/// Tag wrapping the token dump
pub const TOKENS_TAG: &str = "tokens";

/// Sends every token of `tokens` as a leaf, in lexical order, inside a
/// `tokens` element. The cursor is not touched.
pub fn dump_tokens<S: TagSink>(tokens: &TokenStream, sink: &mut S) {
    sink.open(TOKENS_TAG);
    for token in tokens.tokens() {
        sink.leaf(token.token_type(), &token.kind.rendered());
    }
    sink.close(TOKENS_TAG);
}

/// The token dump as text, one unindented leaf per line
pub fn render_tokens(tokens: &TokenStream) -> String {
    let mut writer = XmlWriter::flat();
    dump_tokens(tokens, &mut writer);
    writer.finish()
}

/// Parses a class and renders its parse tree
pub fn render_class(tokens: &mut TokenStream) -> Result<String> {
    let mut writer = XmlWriter::new();
    compile_class(tokens, &mut writer)?;
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jack_lexer::tokenize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_tokens() {
        let (tokens, _) = tokenize("if (x < 007) { let s = \"a&b\"; }", 0);
        assert_eq!(
            render_tokens(&tokens),
            "<tokens>\n\
             <keyword> if </keyword>\n\
             <symbol> ( </symbol>\n\
             <identifier> x </identifier>\n\
             <symbol> &lt; </symbol>\n\
             <integerConstant> 7 </integerConstant>\n\
             <symbol> ) </symbol>\n\
             <symbol> { </symbol>\n\
             <keyword> let </keyword>\n\
             <identifier> s </identifier>\n\
             <symbol> = </symbol>\n\
             <stringConstant> a&b </stringConstant>\n\
             <symbol> ; </symbol>\n\
             <symbol> } </symbol>\n\
             </tokens>\n"
        );
    }

    #[test]
    fn test_dump_leaves_cursor_alone() {
        let (mut tokens, _) = tokenize("a b c", 0);
        tokens.advance();
        let _ = render_tokens(&tokens);
        assert_eq!(tokens.position(), Some(0));
        assert_eq!(tokens.identifier(), Some("a"));
    }

    #[test]
    fn test_render_minimal_class() {
        let (mut tokens, _) = tokenize("class Main { function void main() { return; } }", 0);
        let xml = render_class(&mut tokens).unwrap();
        assert_eq!(
            xml,
            "<class>
  <keyword> class </keyword>
  <identifier> Main </identifier>
  <symbol> { </symbol>
  <subroutineDec>
    <keyword> function </keyword>
    <keyword> void </keyword>
    <identifier> main </identifier>
    <symbol> ( </symbol>
    <parameterList>
    </parameterList>
    <symbol> ) </symbol>
    <subroutineBody>
      <symbol> { </symbol>
      <statements>
        <returnStatement>
          <keyword> return </keyword>
          <symbol> ; </symbol>
        </returnStatement>
      </statements>
      <symbol> } </symbol>
    </subroutineBody>
  </subroutineDec>
  <symbol> } </symbol>
</class>
"
        );
    }
}
