mod record_sign_in_handler;


pub use record_sign_in_handler::RecordSignInCommandHandler;
