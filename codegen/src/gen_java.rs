use crate::{convert::snake_to_camel, generator::CodeGenerator};

/// Dispatch generator for the managed (Java) runtime.
///
/// The wrap direction resolves the packet's dynamic class name against the
/// generated `PacketWrapper.PacketCase` enum; the unwrap direction switches
/// on the populated oneof case. Unknown types are fatal at encode time and
/// silently dropped at decode time.
pub struct JavaGenerator;

const WRAP_MTD_DECL: &str =
    "private static byte[] internalGeneratedWrap(Message packet, int sequence, int ack, int ackBitfield) {";

const UNWRAP_MTD_DECL: &str =
    "private static UnwrappedPacketData internalGeneratedUnwrap(byte[] data) throws InvalidProtocolBufferException {";

impl CodeGenerator for JavaGenerator {
    fn target_name(&self) -> &'static str {
        "Java"
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
            "        String packetClassNameUpper = packet.getClass().getSimpleName().toUpperCase();\n",
            "        PacketWrapper.PacketCase packetType;\n",
            "\n",
            "        try {\n",
            "            packetType = PacketWrapper.PacketCase.valueOf(packetClassNameUpper);\n",
            "        } catch (IllegalArgumentException ex) {\n",
            "            // This packet class has no case in PacketWrapper.PacketCase, i.e. it is\n",
            "            // not listed in the packets.proto 'oneof packet {...}' specification.\n",
            "            throw new RuntimeException(\"illegal packet type: \"\n",
            "                    + packetClassNameUpper + \" (\" + packet.getClass().getName() + \")\");\n",
            "        }\n",
            "\n",
            "        PacketWrapper.Builder wrapper = PacketWrapper.newBuilder()\n",
            "                .setSequence(sequence)\n",
            "                .setAck(ack)\n",
            "                .setAckBitfield(ackBitfield);\n",
            "\n",
            "        switch (packetType) {\n",
        ));

        for packet_type in packet_types {
            let class = snake_to_camel(packet_type);
            src.push_str(&format!("            case {}:\n", packet_type.to_uppercase()));
            src.push_str(&format!("                return wrapper.set{}(\n", class));
            src.push_str(&format!(
                "                        ({}) packet).build().toByteArray();\n\n",
                class
            ));
        }

        src.push_str(concat!(
            "            default:\n",
            "                // No \"case ...\" for packets of this type above.\n",
            "                throw new RuntimeException(\"no implemented transformer for packet type \"\n",
            "                        + packetClassNameUpper + \" (\" + packet.getClass().getName() + \")\");\n",
            "        }\n",
        ));

        src
    }

    fn generate_unwrap_body(&self, packet_types: &[String]) -> String {
        let mut src = String::new();

        src.push_str(concat!(
            "        PacketWrapper wrapper = PacketWrapper.parseFrom(data);\n",
            "        PacketWrapper.PacketCase packetType = wrapper.getPacketCase();\n",
            "\n",
            "        int sequence    = wrapper.getSequence();\n",
            "        int ack         = wrapper.getAck();\n",
            "        int ackBitfield = wrapper.getAckBitfield();\n",
            "\n",
            "        switch (packetType) {\n",
        ));

        for packet_type in packet_types {
            src.push_str(&format!("            case {}:\n", packet_type.to_uppercase()));
            src.push_str("                return new UnwrappedPacketData(sequence, ack, ackBitfield,\n");
            src.push_str(&format!(
                "                        packetType, wrapper.get{}());\n\n",
                snake_to_camel(packet_type)
            ));
        }

        src.push_str(concat!(
            "            default:\n",
            "                // Unknown packet - ignored (not delivered to any packet listener).\n",
            "                return null;\n",
            "        }\n",
        ));

        src
    }
}
