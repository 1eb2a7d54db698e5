mod test_lexer;
