use crate::{convert::snake_to_camel, generator::CodeGenerator};

/// Dispatch generator for the native (C++) runtime.
///
/// The wrap direction is an ordered `dynamic_cast` chain mirroring the
/// schema enumeration order; the envelope takes ownership of the matched
/// packet via `set_allocated_*` and releases it again after serialization
/// so the caller's object is not double-freed. The unwrap direction
/// switches on the wire discriminant and hands back shared-ownership
/// payloads; the discriminant's default case yields `nullptr`.
pub struct CppGenerator;

const WRAP_MTD_DECL: &str =
    "std::shared_ptr<WrappedPacketData> internalGeneratedWrap(google::protobuf::Message* packet, uint32_t sequence, uint32_t ack, uint32_t ackBitfield) {";

const UNWRAP_MTD_DECL: &str =
    "std::shared_ptr<UnwrappedPacketData> internalGeneratedUnwrap(char* data, size_t dataLen) {";

impl CodeGenerator for CppGenerator {
    fn target_name(&self) -> &'static str {
        "C++"
    }

    fn wrap_signature(&self) -> &'static str {
        WRAP_MTD_DECL
    }

    fn unwrap_signature(&self) -> &'static str {
        UNWRAP_MTD_DECL
    }

    fn generate_wrap_body(&self, packet_types: &[String]) -> String {
        let mut src = String::new();

        src.push_str(concat!(
            "        PacketWrapper wrapper;\n",
            "\n",
            "        wrapper.set_sequence(sequence);\n",
            "        wrapper.set_ack(ack);\n",
            "        wrapper.set_ack_bitfield(ackBitfield);\n",
            "\n",
        ));

        for (i, packet_type) in packet_types.iter().enumerate() {
            let field = packet_type.to_lowercase();
            let class = snake_to_camel(packet_type);

            src.push_str("        ");
            if i > 0 {
                src.push_str("else ");
            }
            src.push_str(&format!(
                "if (auto* {} = dynamic_cast<{}*>(packet))\n",
                field, class
            ));
            src.push_str(&format!(
                "            wrapper.set_allocated_{}({});\n",
                field, field
            ));
        }

        src.push_str(concat!(
            "        else\n",
            "            // No \"if ...\" for packets of this type above.\n",
            "            throw std::invalid_argument(\"no implemented transformer for this packet type\");\n",
            "\n",
            "        size_t dataLen = wrapper.ByteSizeLong();\n",
            "        std::shared_ptr<char[]> data(new char[dataLen]);\n",
            "        wrapper.SerializeToArray(data.get(), static_cast<int>(dataLen));\n",
            "\n",
            "        switch (wrapper.packet_case()) {\n",
        ));

        for packet_type in packet_types {
            src.push_str(&format!(
                "            case PacketWrapper::PacketCase::k{}:\n",
                snake_to_camel(packet_type)
            ));
            src.push_str(&format!(
                "                wrapper.release_{}();\n",
                packet_type.to_lowercase()
            ));
            src.push_str("                break;\n\n");
        }

        src.push_str(concat!(
            "            default:\n",
            "                break;\n",
            "        }\n",
            "\n",
            "        return std::make_shared<WrappedPacketData>(data, dataLen);\n",
        ));

        src
    }

    fn generate_unwrap_body(&self, packet_types: &[String]) -> String {
        let mut src = String::new();

        src.push_str(concat!(
            "        PacketWrapper wrapper;\n",
            "        wrapper.ParseFromArray(data, static_cast<int>(dataLen));\n",
            "\n",
            "        uint32_t sequence    = wrapper.sequence();\n",
            "        uint32_t ack         = wrapper.ack();\n",
            "        uint32_t ackBitfield = wrapper.ack_bitfield();\n",
            "\n",
            "        PacketWrapper::PacketCase packetType = wrapper.packet_case();\n",
            "\n",
            "        switch (packetType) {\n",
        ));

        for packet_type in packet_types {
            src.push_str(&format!(
                "            case PacketWrapper::PacketCase::k{}:\n",
                snake_to_camel(packet_type)
            ));
            src.push_str(
                "                return std::make_shared<UnwrappedPacketData>(sequence, ack, ackBitfield, packetType,\n",
            );
            src.push_str(&format!(
                "                        std::make_shared<{}>(wrapper.{}()));\n\n",
                snake_to_camel(packet_type),
                packet_type.to_lowercase()
            ));
        }

        src.push_str(concat!(
            "            default:\n",
            "                // Unknown packet - ignored (not delivered to any packet listener).\n",
            "                return nullptr;\n",
            "        }\n",
        ));

        src
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packets() -> Vec<String> {
        vec!["move_player".to_string(), "chat_message".to_string()]
    }

    #[test]
    fn test_wrap_chain_mirrors_schema_order() {
        let body = CppGenerator.generate_wrap_body(&packets());

        let first = body
            .find("if (auto* move_player = dynamic_cast<MovePlayer*>(packet))")
            .expect("missing first branch");
        let second = body
            .find("else if (auto* chat_message = dynamic_cast<ChatMessage*>(packet))")
            .expect("missing second branch");
        assert!(first < second);
        assert!(body.contains("wrapper.set_allocated_move_player(move_player);"));
    }

    #[test]
    fn test_wrap_sets_reliability_fields_before_dispatch() {
        let body = CppGenerator.generate_wrap_body(&packets());

        let seq_at = body.find("wrapper.set_sequence(sequence);").expect("missing sequence");
        let chain_at = body.find("dynamic_cast").expect("missing chain");
        assert!(seq_at < chain_at);
        assert!(body.contains("wrapper.set_ack(ack);"));
        assert!(body.contains("wrapper.set_ack_bitfield(ackBitfield);"));
    }

    #[test]
    fn test_wrap_releases_ownership_after_serialization() {
        let body = CppGenerator.generate_wrap_body(&packets());

        let serialize_at = body.find("wrapper.SerializeToArray").expect("missing serialize");
        let release_at = body.find("wrapper.release_move_player();").expect("missing release");
        assert!(serialize_at < release_at);
        assert!(body.contains("wrapper.release_chat_message();"));
    }

    #[test]
    fn test_wrap_unmatched_type_is_fatal() {
        let body = CppGenerator.generate_wrap_body(&packets());
        assert!(body.contains("throw std::invalid_argument(\"no implemented transformer"));
    }

    #[test]
    fn test_unwrap_unknown_discriminant_yields_nullptr() {
        let body = CppGenerator.generate_unwrap_body(&packets());

        assert_eq!(body.matches("case PacketWrapper::PacketCase::k").count(), 2);
        assert!(body.contains("case PacketWrapper::PacketCase::kMovePlayer:"));
        assert!(body.contains("std::make_shared<MovePlayer>(wrapper.move_player())"));
        assert!(body.contains("return nullptr;"));
    }

    #[test]
    fn test_bodies_are_brace_balanced() {
        for body in [
            CppGenerator.generate_wrap_body(&packets()),
            CppGenerator.generate_unwrap_body(&packets()),
        ] {
            assert_eq!(body.matches('{').count(), body.matches('}').count());
        }
    }
}
