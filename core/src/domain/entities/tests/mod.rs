mod otp_record_tests;
