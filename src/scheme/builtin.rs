use crate::name::NameParser;

pub(super) struct BuiltinScheme {
    pub scheme: &'static str,
    pub parser: NameParser,
    pub replaced_by: Option<&'static str>,
}

const fn current(scheme: &'static str, parser: NameParser) -> BuiltinScheme {
    BuiltinScheme {
        scheme,
        parser,
        replaced_by: None,
    }
}

const fn legacy(
    scheme: &'static str,
    parser: NameParser,
    replaced_by: &'static str,
) -> BuiltinScheme {
    BuiltinScheme {
        scheme,
        parser,
        replaced_by: Some(replaced_by),
    }
}

pub(super) const BUILTIN_SCHEMES: [BuiltinScheme; 18] = [
    current("file", NameParser::path_only()),
    current("tmp", NameParser::path_only()),
    current("ram", NameParser::path_only()),
    current("res", NameParser::path_only()),
    current("http", NameParser::generic_url(80)),
    current("https", NameParser::generic_url(443)),
    legacy("http4", NameParser::generic_url(80), "http5"),
    legacy("http4s", NameParser::generic_url(443), "http5s"),
    current("http5", NameParser::generic_url(80)),
    current("http5s", NameParser::generic_url(443)),
    current("webdav", NameParser::generic_url(80)),
    current("webdav4", NameParser::generic_url(80)),
    current("webdav4s", NameParser::generic_url(443)),
    current("ftp", NameParser::generic_url(21)),
    current("ftps", NameParser::generic_url(21)),
    current("sftp", NameParser::generic_url(22)),
    current("smb", NameParser::generic_url(139)),
    current("hdfs", NameParser::generic_url(8020)),
];

pub(super) const BUILTIN_ALIASES: [(&str, &str); 1] = [("ssh", "sftp")];
