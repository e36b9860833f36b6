error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Req(::reqwest::Error) #[cfg(feature = "http-client")];
        Toml(::toml::de::Error);
        Regex(::regex::Error);
    }

    errors {
        NonSuccessStatus(url: String, code: u16) {
            description("The status code of a received response was not success.")
            display("The status code of the response from {} was {} and not success.",
                     url, code)
        }

        PortalUnreachable {
            description("The portal landing page did not carry a session token.")
            display("Portal unreachable: no session token found on the landing page")
        }

        InvalidEnrollmentKind(kind: String) {
            description("The enrollment kind was neither undergraduate nor graduate.")
            display("Invalid enrollment kind {:?} (expected \"undergrad\" or \"grad\")", kind)
        }

        InvalidConfig(reason: String) {
            description("The portal configuration could not be used.")
            display("Invalid portal configuration: {}", reason)
        }
    }
}
