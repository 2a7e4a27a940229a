use indoc::indoc;

// Help text template with placeholder
pub const HELP_TEMPLATE: &str = indoc! {r#"
    Records are stored in `config.bin` in the current directory, which is
    created by the first write.

    Examples:
      # Writing a record
      %BINARY_NAME% write 3 alpha hello

      # Reading it back
      %BINARY_NAME% read 3

      # Keys longer than 7 bytes and values longer than 31 bytes are truncated
      %BINARY_NAME% write 0 keyname123456789 val
"#};
