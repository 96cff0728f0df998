use thiserror::Error;

#[derive(Debug, Error)]
pub enum PtransError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "packet {packet} is listed inside the 'oneof packet {{...}}' specification, \
         but its class ('message {class} {{...}}' declaration) is missing in the proto file"
    )]
    UndeclaredPacket { packet: String, class: String },

    #[error(
        "packet class {class} ('message {class} {{...}}' declaration) was detected in the \
         proto file, but the packet itself is not listed inside the 'oneof packet {{...}}' \
         specification"
    )]
    UnenumeratedMessage { class: String },

    #[error("comments of /* this type */ are forbidden inside the 'oneof packet {{...}}' specification")]
    BlockCommentInOneof,

    #[error("malformed packet entry inside 'oneof packet {{...}}': {line}")]
    MalformedOneofEntry { line: String },

    #[error("did not generate any code in {target} source: missing declaration {signature}")]
    SignatureNotFound {
        target:    &'static str,
        signature: &'static str,
    },
}
