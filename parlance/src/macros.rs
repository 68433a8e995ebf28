//! `message_contract!`: declares a message contract and its implementation type.

/// Declares a message contract.
///
/// ```
/// use parlance::{message_contract, MessagesProvider, StaticMessageSource};
///
/// message_contract! {
///     /// Messages shared by every screen.
///     pub contract CommonMessages {
///         fn ok() -> String;
///     }
/// }
///
/// message_contract! {
///     /// Messages of the login screen.
///     pub contract LoginMessages in "ui.login": CommonMessages {
///         /// Shown above the form.
///         fn title() -> String;
///         #[key("login.failed")]
///         #[default("Login failed for {0}")]
///         fn failed(user: &str) -> String;
///     }
/// }
///
/// let provider = MessagesProvider::new(StaticMessageSource::new().with_message("ok", "OK"));
/// let login: LoginMessages = provider.create().unwrap();
///
/// assert_eq!(login.failed("ada").unwrap(), "Login failed for ada");
/// assert_eq!(login.title().unwrap(), "???title???");
/// let common: CommonMessages = login.view().unwrap();
/// assert_eq!(common.ok().unwrap(), "OK");
/// ```
///
/// Every operation becomes a method taking its parameters (anything
/// `Display`) and returning `parlance::Result<String>`. `#[key("...")]`
/// overrides the lookup key, `#[default("...")]` supplies the pattern used
/// when no source has the key. `in "name"` overrides the bundle name, which
/// otherwise is `module_path!()::ContractName`. Parents listed after `:` are
/// searched after the contract's own bundle; a contract without parents
/// extends `RootContract`.
///
/// A declared return type other than `String` compiles, but `create` rejects
/// the contract.
///
/// Operations inherited from a parent are reached through the generated
/// `view::<Parent>()` method, which resolves them through this contract's
/// source. Because of that method, no operation may be named `view`.
#[macro_export]
macro_rules! message_contract {
    (
        $(#[$meta:meta])*
        $vis:vis contract $name:ident $(in $bundle:literal)? $(: $($parent:path),+ $(,)?)? {
            $($body:tt)*
        }
    ) => {
        $crate::__message_contract_ops! {
            @contract [[$(#[$meta])*] [$vis] [$name] [$($bundle)?] [$($($parent),+)?]]
            @ops []
            @docs [] @key [] @default []
            $($body)*
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __message_contract_ops {
    // Doc comment on an operation.
    (
        @contract $contract:tt @ops $ops:tt
        @docs [$($docs:tt)*] @key $key:tt @default $default:tt
        #[doc = $doc:literal] $($rest:tt)*
    ) => {
        $crate::__message_contract_ops! {
            @contract $contract @ops $ops
            @docs [$($docs)* #[doc = $doc]] @key $key @default $default
            $($rest)*
        }
    };

    // Explicit lookup key.
    (
        @contract $contract:tt @ops $ops:tt
        @docs $docs:tt @key [] @default $default:tt
        #[key($key:literal)] $($rest:tt)*
    ) => {
        $crate::__message_contract_ops! {
            @contract $contract @ops $ops
            @docs $docs @key [$key] @default $default
            $($rest)*
        }
    };

    // Default pattern.
    (
        @contract $contract:tt @ops $ops:tt
        @docs $docs:tt @key $key:tt @default []
        #[default($default:literal)] $($rest:tt)*
    ) => {
        $crate::__message_contract_ops! {
            @contract $contract @ops $ops
            @docs $docs @key $key @default [$default]
            $($rest)*
        }
    };

    (
        @contract $contract:tt @ops $ops:tt
        @docs $docs:tt @key $key:tt @default $default:tt
        #[$($unsupported:tt)*] $($rest:tt)*
    ) => {
        ::core::compile_error!(concat!(
            "unsupported or repeated attribute on a message operation: #[",
            stringify!($($unsupported)*),
            "]; expected one #[key(\"...\")] and/or one #[default(\"...\")]"
        ));
    };

    // An operation: record it with the collected metadata and reset.
    (
        @contract $contract:tt @ops [$($ops:tt)*]
        @docs $docs:tt @key $key:tt @default $default:tt
        fn $op:ident ($($arg:ident : $ty:ty),* $(,)?) $(-> $ret:ty)?; $($rest:tt)*
    ) => {
        $crate::__message_contract_ops! {
            @contract $contract
            @ops [$($ops)* { $docs $op [$($arg : $ty),*] [$($ret)?] $key $default }]
            @docs [] @key [] @default []
            $($rest)*
        }
    };

    // All operations collected.
    (
        @contract [
            [$($meta:tt)*] [$vis:vis] [$name:ident] [$($bundle:literal)?] [$($parent:path),*]
        ]
        @ops [$({
            [$($doc:tt)*] $op:ident [$($arg:ident : $ty:ty),*] [$($ret:ty)?]
            [$($key:literal)?] [$($default:literal)?]
        })*]
        @docs [] @key [] @default []
    ) => {
        $($meta)*
        #[derive(Clone, Debug)]
        $vis struct $name {
            messages: $crate::Messages,
        }

        #[allow(dead_code)]
        impl $name {
            $(
                $($doc)*
                pub fn $op(&self $(, $arg: $ty)*) -> $crate::Result<::std::string::String> {
                    let args: &[&dyn ::std::fmt::Display] = &[$(&$arg),*];
                    self.messages.invoke(::core::stringify!($op), args)
                }
            )*

            /// Views this implementation as one of its ancestor contracts.
            pub fn view<P: $crate::MessageContract>(&self) -> $crate::Result<P> {
                self.messages.view::<P>()
            }
        }

        impl $crate::MessageContract for $name {
            fn descriptor() -> &'static $crate::ContractDescriptor {
                static DESCRIPTOR: $crate::__private::Lazy<$crate::ContractDescriptor> =
                    $crate::__private::Lazy::new(|| {
                        let contract = $crate::ContractDescriptor::interface(::core::concat!(
                            ::core::module_path!(),
                            "::",
                            ::core::stringify!($name)
                        ))
                        $(.bundle($bundle))?
                        $(
                            .operation(
                                $crate::OperationDescriptor::new(::core::stringify!($op))
                                    $(.key($key))?
                                    $(.default_pattern($default))?
                                    $(.param(::core::stringify!($arg), ::core::stringify!($ty)))*
                                    .returns($crate::ReturnType::from_type_name(
                                        ::core::stringify!($($ret)?),
                                    )),
                            )
                        )*;
                        $crate::__message_contract_extends!(contract; $($parent),*)
                    });
                &DESCRIPTOR
            }

            fn from_messages(messages: $crate::Messages) -> Self {
                Self { messages }
            }

            fn messages(&self) -> &$crate::Messages {
                &self.messages
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __message_contract_extends {
    ($contract:ident;) => {
        $contract.extends(<$crate::RootContract as $crate::MessageContract>::descriptor)
    };
    ($contract:ident; $($parent:path),+) => {
        $contract$(.extends(<$parent as $crate::MessageContract>::descriptor))+
    };
}
