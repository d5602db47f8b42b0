/// Generate client methods with oneshot channel boilerplate, a caller-side
/// timeout and automatic tracing. Arguments listed in `skip(..)` are left out
/// of the span; use it for anything carrying personal data.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident $(, skip($($skip:ident),*))?) => {
        impl $client {
            #[::tracing::instrument(skip(self $($(, $skip)*)?))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::user_store::UserError> {
                ::tracing::debug!("Sending request");
                let (respond_to, response) = ::tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| $crate::user_store::UserError::ActorCommunicationError("Actor closed".to_string()))?;

                match ::tokio::time::timeout(self.timeout, response).await {
                    Ok(result) => result.map_err(|_| {
                        $crate::user_store::UserError::ActorCommunicationError("Actor dropped".to_string())
                    })?,
                    Err(_) => Err($crate::user_store::UserError::Timeout(self.timeout)),
                }
            }
        }
    };
}
