#[cfg(test)]
mod scanner_tests {
    use lox_frontend as lox;

    use lox::error::{LexError, LoxError};
    use lox::scanner::*;
    use lox::token::*;
    use pretty_assertions::assert_eq;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanned = scan(source);
        assert!(!scanned.had_error(), "unexpected errors: {:?}", scanned.errors);

        let actual: Vec<(TokenType, &str)> = scanned
            .tokens
            .iter()
            .map(|t| (t.token_type, t.lexeme))
            .collect();

        assert_eq!(actual, expected.to_vec());
    }

    fn rendered(source: &str) -> Vec<String> {
        scan(source).tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= ===",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::EQUAL, "="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_single_tokens_produce_two_tokens() {
        for source in ["(", "!=", "\"hi\"", "42", "4.5", "foo", "while", "/"] {
            let scanned = scan(source);
            assert!(!scanned.had_error());
            assert_eq!(scanned.tokens.len(), 2, "source {:?}", source);
            assert_eq!(scanned.tokens[0].lexeme, source);
            assert_eq!(scanned.tokens[1].token_type, TokenType::EOF);
        }
    }

    #[test]
    fn test_whitespace_and_comments_only() {
        for source in ["", "   \t\r\n  ", "// nothing here", "// one\n// two\n"] {
            let scanned = scan(source);
            assert!(!scanned.had_error());
            assert_eq!(scanned.tokens.len(), 1);
            assert_eq!(scanned.tokens[0].token_type, TokenType::EOF);
            assert_eq!(scanned.tokens[0].lexeme, "");
        }
    }

    #[test]
    fn test_comment_and_slash() {
        assert_token_sequence(
            "a / b // c / d\n/",
            &[
                (TokenType::IDENTIFIER, "a"),
                (TokenType::SLASH, "/"),
                (TokenType::IDENTIFIER, "b"),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_line_numbers() {
        let scanned = scan("one\n\ntwo // x\nthree");
        let lines: Vec<usize> = scanned.tokens.iter().map(|t| t.line).collect();

        assert_eq!(lines, vec![1, 3, 4, 4]);
    }

    #[test]
    fn test_string_literal() {
        let scanned = scan("\"hello world\"");
        let token = &scanned.tokens[0];

        assert_eq!(token.token_type, TokenType::STRING);
        assert_eq!(token.lexeme, "\"hello world\"");
        assert_eq!(
            token.literal,
            Some(LiteralValue::Str("hello world".to_string()))
        );
        assert_eq!(token.to_string(), "STRING \"hello world\" hello world");
    }

    #[test]
    fn test_multiline_string_keeps_opening_line() {
        let scanned = scan("\"a\nb\" x");

        assert_eq!(scanned.tokens[0].line, 1);
        assert_eq!(
            scanned.tokens[0].literal,
            Some(LiteralValue::Str("a\nb".to_string()))
        );
        assert_eq!(scanned.tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let scanned = scan("\"abc");

        assert!(scanned.had_error());
        assert_eq!(scanned.errors, vec![LexError::UnterminatedString { line: 1 }]);
        assert_eq!(scanned.errors[0].to_string(), "[line 1] Error: Unterminated string.");
        assert!(scanned
            .tokens
            .iter()
            .all(|t| t.token_type != TokenType::STRING));
        assert_eq!(scanned.tokens.len(), 1);
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(
            rendered("123 45.67 0.5 1.0"),
            vec![
                "NUMBER 123 123.0",
                "NUMBER 45.67 45.67",
                "NUMBER 0.5 0.5",
                "NUMBER 1.0 1.0",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_number_literals_general_form() {
        assert_eq!(
            rendered("1234567.5 0.00001"),
            vec![
                "NUMBER 1234567.5 1.2345675e+06",
                "NUMBER 0.00001 1e-05",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_overflowing_number_literal() {
        let source = format!("1{}", "0".repeat(400));
        let scanned = scan(&source);

        assert!(!scanned.had_error());
        assert_eq!(
            scanned.tokens[0].literal,
            Some(LiteralValue::Number(f64::INFINITY))
        );
        assert_eq!(scanned.tokens[0].to_string(), format!("NUMBER {} +Inf", source));
    }

    #[test]
    fn test_trailing_dot_is_separate_token() {
        assert_token_sequence(
            "12.",
            &[
                (TokenType::NUMBER, "12"),
                (TokenType::DOT, "."),
                (TokenType::EOF, ""),
            ],
        );

        assert_token_sequence(
            ".5",
            &[
                (TokenType::DOT, "."),
                (TokenType::NUMBER, "5"),
                (TokenType::EOF, ""),
            ],
        );

        let scanned = scan("12.");
        assert_eq!(scanned.tokens[0].literal, Some(LiteralValue::Number(12.0)));
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_token_sequence(
            "and class else false for fun if nil or print return super this true var while _x orchid",
            &[
                (TokenType::AND, "and"),
                (TokenType::CLASS, "class"),
                (TokenType::ELSE, "else"),
                (TokenType::FALSE, "false"),
                (TokenType::FOR, "for"),
                (TokenType::FUN, "fun"),
                (TokenType::IF, "if"),
                (TokenType::NIL, "nil"),
                (TokenType::OR, "or"),
                (TokenType::PRINT, "print"),
                (TokenType::RETURN, "return"),
                (TokenType::SUPER, "super"),
                (TokenType::THIS, "this"),
                (TokenType::TRUE, "true"),
                (TokenType::VAR, "var"),
                (TokenType::WHILE, "while"),
                (TokenType::IDENTIFIER, "_x"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_token_rendering() {
        assert_eq!(
            rendered("var x = (1);"),
            vec![
                "VAR var null",
                "IDENTIFIER x null",
                "EQUAL = null",
                "LEFT_PAREN ( null",
                "NUMBER 1 1.0",
                "RIGHT_PAREN ) null",
                "SEMICOLON ; null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // COMMA, DOT, error '$', LEFT_PAREN, error '#', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_eq!(results[0].as_ref().map(|t| t.token_type), Ok(TokenType::COMMA));
        assert_eq!(results[1].as_ref().map(|t| t.token_type), Ok(TokenType::DOT));
        assert_eq!(
            results[2],
            Err(LexError::UnexpectedCharacter { ch: '$', line: 1 })
        );
        assert_eq!(
            results[3].as_ref().map(|t| t.token_type),
            Ok(TokenType::LEFT_PAREN)
        );
        assert_eq!(
            results[4],
            Err(LexError::UnexpectedCharacter { ch: '#', line: 1 })
        );
        assert_eq!(results[5].as_ref().map(|t| t.token_type), Ok(TokenType::EOF));
    }

    #[test]
    fn test_all_errors_reported() {
        let scanned = scan("@\n\"open");
        let messages: Vec<String> = scanned.errors.iter().map(|e| e.to_string()).collect();

        assert_eq!(
            messages,
            vec![
                "[line 1] Error: Unexpected character: @",
                "[line 2] Error: Unterminated string.",
            ]
        );
        assert_eq!(scanned.tokens.last().map(|t| t.line), Some(2));

        let lines: Vec<usize> = scanned.errors.iter().map(LexError::line).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn test_lex_error_converts_to_lox_error() {
        let scanned = scan("$");
        let err: LoxError = scanned.errors[0].clone().into();

        assert!(err.is_source_error());
        assert_eq!(err.to_string(), "[line 1] Error: Unexpected character: $");
        assert!(matches!(err, LoxError::Lex(LexError::UnexpectedCharacter { ch: '$', line: 1 })));
    }

    #[test]
    fn test_non_ascii_reported_once_per_char() {
        let scanned = scan("é+");

        assert_eq!(
            scanned.errors,
            vec![LexError::UnexpectedCharacter { ch: 'é', line: 1 }]
        );
        assert_eq!(scanned.tokens[0].token_type, TokenType::PLUS);
    }

    #[test]
    fn test_scanner_is_fused() {
        let mut scanner = Scanner::new("x");

        assert!(scanner.next().is_some());
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
