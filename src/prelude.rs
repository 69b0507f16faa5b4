//! Iara prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    address::{AddressFields, PostalCode, StoredAddress},
    cart::{CartChange, CartError, CartEvent, CartManager, CartObserver, SubscriptionId, Toggled},
    checkout::{
        CardDetails, CardSettlement, CheckoutError, CheckoutForm, CheckoutOrchestrator,
        CheckoutOutcome, CheckoutState, InstantSettlement, SettlementError,
    },
    clock::{Clock, FixedClock, SystemClock},
    items::CartItem,
    orders::{Customer, Order, OrderId, OrderStore, OrderStoreError, OrderSummary, PaymentMethod},
    payments::{
        BoletoArtifact, BoletoError, BoletoRequest, PaymentArtifact, PaymentError, PixArtifact,
        PixError, PixRequest, generate_boleto, generate_pix,
    },
    pricing::total_price,
    receipt::{ReceiptError, write_cart, write_order},
    session::{SessionError, SessionStore},
    storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageExt, StorageKey},
    validation::{Field, FieldError, RegistrationForm, ValidationErrors},
};
