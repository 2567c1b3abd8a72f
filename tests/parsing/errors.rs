#[cfg(test)]
mod syntax {
    use std::path::Path;

    use marquee::language::Config;
    use marquee::parsing::parse_line;
    use marquee::parsing::parser::{parse_via_scanning, ParsingError};

    /// Helper function to check that parsing fails with exactly the expected
    /// error
    fn expect_error(content: &str, expected: ParsingError) {
        let config = Config::default();
        match parse_via_scanning(&config, content) {
            Ok(tokens) => panic!(
                "Expected parsing to fail, but it succeeded for input '{}': {:?}",
                content, tokens
            ),
            Err(error) => assert_eq!(error, expected, "for input '{}'", content),
        }
    }

    #[test]
    fn unknown_directive() {
        expect_error("${bogus}", ParsingError::UnknownDirective(2));
        expect_error("text ${iffy}", ParsingError::UnknownDirective(7));
        expect_error("${}", ParsingError::UnknownDirective(2));
    }

    #[test]
    fn unterminated_directive() {
        expect_error(
            "${if x",
            ParsingError::ExpectedMatchingChar(6, "a directive", '{', '}'),
        );
        expect_error(
            "${else\n}",
            ParsingError::ExpectedMatchingChar(6, "a directive", '{', '}'),
        );
    }

    #[test]
    fn missing_expression() {
        expect_error("${if}", ParsingError::InvalidExpression(4));
        expect_error("${case }", ParsingError::InvalidExpression(7));
    }

    #[test]
    fn malformed_forall() {
        expect_error("${forall x in xs}", ParsingError::InvalidForall(11));
        expect_error("${forall x <- }", ParsingError::InvalidExpression(14));
    }

    #[test]
    fn malformed_interpolation() {
        expect_error(
            "Hello #{name",
            ParsingError::ExpectedMatchingChar(12, "an interpolation", '{', '}'),
        );
        expect_error("#{}", ParsingError::InvalidExpression(2));
    }

    #[test]
    fn malformed_patterns() {
        expect_error("${of ()}", ParsingError::InvalidBinding(6));
        expect_error(
            "${of Person{Name}}",
            ParsingError::InvalidIdentifier(12, "Name".to_string()),
        );
        expect_error(
            "${of [a, b}",
            ParsingError::ExpectedMatchingChar(10, "a list pattern", '[', ']'),
        );
    }

    #[test]
    fn deeply_nested_pattern() {
        let config = Config::default();
        let text = format!("${{of {}x{}}}", "(".repeat(100), ")".repeat(100));

        assert!(matches!(
            parse_via_scanning(&config, &text),
            Err(ParsingError::TooDeeplyNested(_))
        ));
    }

    #[test]
    fn long_alias_chain() {
        let config = Config::default();
        let text = format!("${{of {}x}}", "a@".repeat(200_000));

        assert!(matches!(
            parse_via_scanning(&config, &text),
            Err(ParsingError::TooDeeplyNested(_))
        ));
    }

    #[test]
    fn no_partial_results() {
        let config = Config::default();
        let result = parse_via_scanning(&config, "fine\n${if ok}\nfine\n${bogus}\nfine\n");
        assert_eq!(result, Err(ParsingError::UnknownDirective(21)));
    }

    #[test]
    fn reported_position() {
        let config = Config::default();
        let content = "first line\nsecond ${if x\nthird";

        let error = parse_line(&config, content).unwrap_err();
        assert_eq!(error.offset, 24);
        assert_eq!(error.position(), (2, 14));
        assert_eq!(
            error.to_string(),
            "2:14: expected '}' to close a directive begun with '{'"
        );

        let details = error.full_details(Path::new("letter.mq"));
        assert!(details.contains("letter.mq:2:14"));
        assert!(details.contains("second ${if x"));
    }
}
